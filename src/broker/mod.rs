//! Broker-facing data
//!
//! Position and price snapshots plus FX conversion. Connectivity, auth and
//! retry against a real broker live outside this crate; everything here is
//! already-resolved data the core consumes by value.

mod fx;
mod types;

pub use fx::gbp_per_usd;
pub use types::{PositionSnapshot, PriceMap};
