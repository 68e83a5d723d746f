//! Risk-based position sizing

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Shares to buy so that the loss at the stop is about `per_trade_risk` of
/// NAV: `floor(nav * per_trade_risk / (price * stop_pct))`.
///
/// Returns 0 for a degenerate stop distance (`price * stop_pct <= 0`) rather
/// than dividing by zero, and never goes negative.
pub fn risk_sized_qty(
    nav: Decimal,
    price: Decimal,
    per_trade_risk: Decimal,
    stop_pct: Decimal,
) -> i64 {
    let risk_per_share = price * stop_pct;
    if risk_per_share <= Decimal::ZERO {
        return 0;
    }
    let risk_budget = nav * per_trade_risk;
    (risk_budget / risk_per_share)
        .floor()
        .to_i64()
        .unwrap_or(0)
        .max(0)
}
