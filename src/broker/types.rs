//! Broker snapshot types
//!
//! Plain data handed to the planner by whatever broker integration is in
//! play. The planner treats missing entries as "unknown", never as an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Symbol → last traded price, in account currency. A missing entry means no
/// tradable price is available right now (timed-out fetch, halted name).
pub type PriceMap = HashMap<String, Decimal>;

/// Immutable read of one current holding. Symbols absent from the snapshot
/// map imply a zero position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Exchange ticker
    pub symbol: String,
    /// Signed held shares
    pub qty: i64,
    /// Average entry price
    pub avg_price: Decimal,
    /// Position currency
    pub currency: String,
}
