//! Reconciliation and risk capping
//!
//! The core of the bot: turns signal-stage trade intents into deduplicated,
//! risk-capped child orders against a snapshot of current holdings. Pure and
//! synchronous; all I/O lives with the collaborators that supply snapshots.

mod dedup;
mod plan;
mod portfolio;
mod types;

pub use dedup::dedup_intents;
pub use plan::{plan, RiskCaps, UnpricedPolicy};
pub use portfolio::cap_positions;
pub use types::{ChildOrder, ReconError, Side, TradeIntent};
