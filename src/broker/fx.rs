//! FX conversion helper
//!
//! NAV is held in GBP while US equity prices are USD; the planner needs both
//! on one scale. Rate priority: `FX_GBP_PER_USD` env override, then a safe
//! static default.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Fallback GBPUSD spot (≈ $1 = £0.78)
const DEFAULT_GBP_PER_USD: Decimal = dec!(0.78);

/// Return GBP per USD for converting a GBP NAV into USD notionals.
pub fn gbp_per_usd() -> Decimal {
    if let Ok(raw) = std::env::var("FX_GBP_PER_USD") {
        match Decimal::from_str(&raw) {
            Ok(v) if v > Decimal::ZERO => return v,
            _ => {
                tracing::warn!(value = %raw, "invalid FX_GBP_PER_USD, using default rate");
            }
        }
    }
    DEFAULT_GBP_PER_USD
}
