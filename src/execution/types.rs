//! Execution types

use crate::recon::{ChildOrder, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order identifier
pub type OrderId = Uuid;

/// An entry order paired with its protective stop (opposite side) and an
/// optional trailing stop, submitted as one linked unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketOrder {
    /// Exchange ticker
    pub symbol: String,
    /// Entry side
    pub side: Side,
    /// Unsigned share count
    pub qty: u64,
    /// Entry limit price
    pub entry_limit: Decimal,
    /// Protective stop price
    pub stop_loss: Decimal,
    /// Trailing-stop activation price
    pub trail_start: Option<Decimal>,
    /// Trailing distance, fraction of price
    pub trail_pct: Option<Decimal>,
    /// Strategy label
    pub tag: String,
}

impl BracketOrder {
    /// Build a bracket from a planned child order.
    ///
    /// `None` when the child carries no entry or stop price, or a zero
    /// quantity; such orders cannot be safely bracketed.
    pub fn from_child(child: &ChildOrder) -> Option<Self> {
        if child.qty == 0 {
            return None;
        }
        Some(Self {
            symbol: child.symbol.clone(),
            side: child.side(),
            qty: child.qty.unsigned_abs(),
            entry_limit: child.entry_limit?,
            stop_loss: child.stop_loss?,
            trail_start: child.trail_start,
            trail_pct: child.trail_pct,
            tag: child.tag.clone(),
        })
    }

    /// Side of the protective stop leg.
    pub fn stop_side(&self) -> Side {
        match self.side {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// A simulated or reported fill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Order ID
    pub order_id: OrderId,
    /// Exchange ticker
    pub symbol: String,
    /// Fill side
    pub side: Side,
    /// Fill price
    pub price: Decimal,
    /// Filled shares
    pub qty: u64,
    /// Fill timestamp
    pub timestamp: DateTime<Utc>,
}
