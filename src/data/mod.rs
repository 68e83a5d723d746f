//! Market data
//!
//! Universe selection and daily-bar fetching. All network failures degrade to
//! empty data so the trading pipeline can treat "no bars" uniformly.

mod bars;
mod universe;

pub use bars::{BarsClient, BarsConfig, POLYGON_API_URL};
pub use universe::build_universe;
