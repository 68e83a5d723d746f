//! Reconciliation types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

/// A target trade produced by the signal/sizing stage.
///
/// The quantity is signed: positive means a long target, negative a short
/// target. Bracket prices are carried through the planner unchanged; only
/// `qty` is ever rewritten, and always via [`TradeIntent::with_qty`] on a
/// fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    /// Exchange ticker
    pub symbol: String,
    /// Signed share quantity (positive = long, negative = short)
    pub qty: i64,
    /// Entry limit price
    pub entry_limit: Option<Decimal>,
    /// Protective stop price
    pub stop_loss: Option<Decimal>,
    /// Price at which the trailing stop activates
    pub trail_start: Option<Decimal>,
    /// Trailing stop distance as a fraction of price
    pub trail_pct: Option<Decimal>,
    /// Strategy label, immutable passthrough
    pub tag: String,
}

impl TradeIntent {
    /// Trade side, derived from the sign of `qty`.
    pub fn side(&self) -> Side {
        if self.qty >= 0 {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    /// Copy-update constructor: same intent with a different quantity.
    pub fn with_qty(&self, qty: i64) -> Self {
        Self {
            qty,
            ..self.clone()
        }
    }
}

/// A trade intent whose `qty` is the delta from current holdings to the
/// capped target. Zero deltas are never emitted.
pub type ChildOrder = TradeIntent;

/// Planner configuration errors. These are caller contract violations and
/// fail the run before any planning happens.
#[derive(Debug, Error)]
pub enum ReconError {
    /// NAV must be a positive currency amount
    #[error("non-positive NAV: {0}")]
    NonPositiveNav(Decimal),
    /// At least one position slot is required
    #[error("max_positions must be positive")]
    NonPositiveMaxPositions,
}
