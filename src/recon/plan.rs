//! Risk-cap planner
//!
//! Turns independently-generated trade intents into a bounded, deduplicated,
//! capital-aware set of child orders. Stages run in strict order because the
//! caps are applied progressively and must all hold on the final output:
//!
//! 1. dedup per symbol (largest absolute quantity wins)
//! 2. rank by intended notional, descending
//! 3. truncate to `max_positions`
//! 4. per-name dollar cap, if configured
//! 5. pro-rata gross-exposure haircut
//! 6. diff against current holdings, suppressing zero deltas
//!
//! The planner is a pure function of its snapshots: it never mutates caller
//! state and performs no I/O.

use super::{dedup_intents, ChildOrder, ReconError, TradeIntent};
use crate::broker::{PositionSnapshot, PriceMap};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// What to do with an intent whose symbol has no tradable price when no
/// per-name cap is configured. With a per-name cap the intent is always
/// dropped, since the cap cannot be verified without a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnpricedPolicy {
    /// Carry the intent to the diff stage with its original quantity
    #[default]
    PassThrough,
    /// Drop the intent, never submitting an unverifiable notional
    Skip,
}

/// Portfolio-level risk caps, all enforced simultaneously on the planner's
/// output. NAV and prices must share a currency.
#[derive(Debug, Clone)]
pub struct RiskCaps {
    /// Maximum number of concurrent target positions
    pub max_positions: usize,
    /// Gross exposure ceiling as a fraction of NAV
    pub max_gross_exposure: Decimal,
    /// Net asset value in price currency
    pub nav: Decimal,
    /// Optional per-name ceiling as a fraction of NAV
    pub per_name_cap: Option<Decimal>,
    /// Policy for symbols missing from the price map
    pub unpriced: UnpricedPolicy,
}

impl RiskCaps {
    /// Reject configurations the planner cannot safely run with.
    pub fn validate(&self) -> Result<(), ReconError> {
        if self.nav <= Decimal::ZERO {
            return Err(ReconError::NonPositiveNav(self.nav));
        }
        if self.max_positions == 0 {
            return Err(ReconError::NonPositiveMaxPositions);
        }
        Ok(())
    }
}

/// Intended dollar size of an intent. Symbols without a price rank at zero.
fn notional(intent: &TradeIntent, prices: &PriceMap) -> Decimal {
    let px = prices
        .get(&intent.symbol)
        .copied()
        .unwrap_or(Decimal::ZERO);
    Decimal::from(intent.qty.abs()) * px
}

/// Preserve the sign of `reference` on a non-negative magnitude.
fn with_sign(magnitude: i64, reference: i64) -> i64 {
    if reference < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Plan child orders from target intents, current holdings and last prices.
///
/// Returns one order per symbol whose capped target differs from the current
/// position; the order quantity is the signed delta to reach the target. An
/// empty result means "nothing to do", not an error.
pub fn plan(
    intents: &[TradeIntent],
    positions: &HashMap<String, PositionSnapshot>,
    prices: &PriceMap,
    caps: &RiskCaps,
) -> Result<Vec<ChildOrder>, ReconError> {
    caps.validate()?;

    if intents.is_empty() {
        return Ok(vec![]);
    }

    // Stage 1: one intent per symbol
    let deduped = dedup_intents(intents);

    // Stage 2: largest intended dollar size first, on precomputed notional
    // keys. The sort is stable, so equal notionals (including all unpriced
    // symbols at zero) keep dedup output order.
    let mut ranked: Vec<(Decimal, TradeIntent)> = deduped
        .into_iter()
        .map(|t| (notional(&t, prices), t))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    // Stage 3: hard position-count cap
    ranked.truncate(caps.max_positions);

    // Stage 4: per-name dollar cap and unpriced-symbol policy
    let mut sized: Vec<TradeIntent> = Vec::with_capacity(ranked.len());
    for (_, t) in ranked {
        let px = prices.get(&t.symbol).copied().unwrap_or(Decimal::ZERO);
        if px <= Decimal::ZERO {
            if caps.per_name_cap.is_none() && caps.unpriced == UnpricedPolicy::PassThrough {
                sized.push(t);
            }
            continue;
        }
        if let Some(cap) = caps.per_name_cap {
            let max_dollars = cap * caps.nav;
            if Decimal::from(t.qty.abs()) * px > max_dollars {
                let qty_cap = (max_dollars / px).floor().to_i64().unwrap_or(0);
                if qty_cap <= 0 {
                    continue;
                }
                sized.push(t.with_qty(with_sign(qty_cap, t.qty)));
                continue;
            }
        }
        sized.push(t);
    }

    // Stage 5: pro-rata gross-exposure haircut. Strict greater-than, no
    // epsilon: an exactly-at-cap book is left alone.
    let intended: Decimal = sized.iter().map(|t| notional(t, prices)).sum();
    let max_dollars_total = caps.max_gross_exposure * caps.nav;
    let targets: Vec<TradeIntent> = if intended > max_dollars_total && intended > Decimal::ZERO {
        let scale = max_dollars_total / intended;
        sized
            .into_iter()
            .filter_map(|t| {
                let scaled = (Decimal::from(t.qty.abs()) * scale)
                    .floor()
                    .to_i64()
                    .unwrap_or(0);
                if scaled == 0 {
                    None
                } else {
                    Some(t.with_qty(with_sign(scaled, t.qty)))
                }
            })
            .collect()
    } else {
        sized
    };

    // Stage 6: diff against holdings; symbols already at target need no order
    let mut child: Vec<ChildOrder> = Vec::with_capacity(targets.len());
    for t in targets {
        let cur_qty = positions.get(&t.symbol).map(|p| p.qty).unwrap_or(0);
        let delta = t.qty - cur_qty;
        if delta == 0 {
            continue;
        }
        child.push(t.with_qty(delta));
    }

    tracing::info!(child_orders = child.len(), "reconciliation planned");
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn intent(symbol: &str, qty: i64) -> TradeIntent {
        TradeIntent {
            symbol: symbol.to_string(),
            qty,
            entry_limit: Some(dec!(10.55)),
            stop_loss: Some(dec!(10.00)),
            trail_start: Some(dec!(11.00)),
            trail_pct: Some(dec!(0.04)),
            tag: "VOBREAKOUT".to_string(),
        }
    }

    fn position(symbol: &str, qty: i64) -> PositionSnapshot {
        PositionSnapshot {
            symbol: symbol.to_string(),
            qty,
            avg_price: dec!(10),
            currency: "USD".to_string(),
        }
    }

    fn caps(max_positions: usize, gross: Decimal, nav: Decimal) -> RiskCaps {
        RiskCaps {
            max_positions,
            max_gross_exposure: gross,
            nav,
            per_name_cap: None,
            unpriced: UnpricedPolicy::default(),
        }
    }

    #[test]
    fn test_empty_intents() {
        let out = plan(
            &[],
            &HashMap::new(),
            &PriceMap::new(),
            &caps(5, dec!(1.0), dec!(1000)),
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_nav() {
        let result = plan(
            &[intent("AAA", 10)],
            &HashMap::new(),
            &PriceMap::new(),
            &caps(5, dec!(1.0), dec!(0)),
        );
        assert!(matches!(result, Err(ReconError::NonPositiveNav(_))));
    }

    #[test]
    fn test_rejects_zero_max_positions() {
        let result = plan(
            &[intent("AAA", 10)],
            &HashMap::new(),
            &PriceMap::new(),
            &caps(0, dec!(1.0), dec!(1000)),
        );
        assert!(matches!(result, Err(ReconError::NonPositiveMaxPositions)));
    }

    #[test]
    fn test_position_count_cap_keeps_largest_notional() {
        let prices = PriceMap::from([
            ("AAA".to_string(), dec!(10)),
            ("BBB".to_string(), dec!(10)),
            ("CCC".to_string(), dec!(10)),
        ]);
        let out = plan(
            &[intent("AAA", 10), intent("BBB", 50), intent("CCC", 30)],
            &HashMap::new(),
            &prices,
            &caps(2, dec!(1.0), dec!(100_000)),
        )
        .unwrap();
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BBB", "CCC"]);
    }

    #[test]
    fn test_equal_notionals_keep_input_order() {
        // Same dollar size everywhere: the count cap must keep the earliest
        // intents, not whichever the sort happens to visit first.
        let prices = PriceMap::from([
            ("AAA".to_string(), dec!(10)),
            ("BBB".to_string(), dec!(10)),
            ("CCC".to_string(), dec!(10)),
        ]);
        let out = plan(
            &[intent("AAA", 40), intent("BBB", 40), intent("CCC", 40)],
            &HashMap::new(),
            &prices,
            &caps(2, dec!(1.0), dec!(100_000)),
        )
        .unwrap();
        let symbols: Vec<&str> = out.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_per_name_cap_shrinks_preserving_sign() {
        let prices = PriceMap::from([("AAA".to_string(), dec!(10))]);
        let mut c = caps(5, dec!(10.0), dec!(1000));
        c.per_name_cap = Some(dec!(0.50)); // $500 per name
        let out = plan(&[intent("AAA", -100)], &HashMap::new(), &prices, &c).unwrap();
        assert_eq!(out.len(), 1);
        // floor(500 / 10) = 50, short sign preserved
        assert_eq!(out[0].qty, -50);
    }

    #[test]
    fn test_per_name_cap_drops_when_shrunk_to_zero() {
        let prices = PriceMap::from([("AAA".to_string(), dec!(1000))]);
        let mut c = caps(5, dec!(10.0), dec!(1000));
        c.per_name_cap = Some(dec!(0.50)); // $500 < one share
        let out = plan(&[intent("AAA", 3)], &HashMap::new(), &prices, &c).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_gross_cap_scales_pro_rata() {
        // Scenario B: 1000 shares @ $100 = $100k intended against $1k NAV
        let prices = PriceMap::from([("XYZ".to_string(), dec!(100))]);
        let out = plan(
            &[intent("XYZ", 1000)],
            &HashMap::new(),
            &prices,
            &caps(10, dec!(1.0), dec!(1000)),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].qty, 10); // floor(1000 * 1000/100000)
    }

    #[test]
    fn test_gross_cap_exact_boundary_untouched() {
        // intended == cap: strict > means no haircut
        let prices = PriceMap::from([("AAA".to_string(), dec!(10))]);
        let out = plan(
            &[intent("AAA", 100)],
            &HashMap::new(),
            &prices,
            &caps(10, dec!(1.0), dec!(1000)),
        )
        .unwrap();
        assert_eq!(out[0].qty, 100);
    }

    #[test]
    fn test_unpriced_dropped_under_per_name_cap() {
        // Scenario C
        let mut c = caps(5, dec!(1.0), dec!(1000));
        c.per_name_cap = Some(dec!(0.50));
        let out = plan(&[intent("NOPX", 100)], &HashMap::new(), &PriceMap::new(), &c).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unpriced_pass_through_without_per_name_cap() {
        let out = plan(
            &[intent("NOPX", 100)],
            &HashMap::new(),
            &PriceMap::new(),
            &caps(5, dec!(1.0), dec!(1000)),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].qty, 100);
    }

    #[test]
    fn test_unpriced_skip_policy() {
        let mut c = caps(5, dec!(1.0), dec!(1000));
        c.unpriced = UnpricedPolicy::Skip;
        let out = plan(&[intent("NOPX", 100)], &HashMap::new(), &PriceMap::new(), &c).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unpriced_sorts_last() {
        let prices = PriceMap::from([("AAA".to_string(), dec!(1))]);
        let out = plan(
            &[intent("NOPX", 1_000_000), intent("AAA", 1)],
            &HashMap::new(),
            &prices,
            &caps(1, dec!(10.0), dec!(1000)),
        )
        .unwrap();
        // NOPX has notional 0 and must lose the single slot to AAA
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "AAA");
    }

    #[test]
    fn test_diff_emits_delta() {
        let prices = PriceMap::from([("AAA".to_string(), dec!(10))]);
        let positions = HashMap::from([("AAA".to_string(), position("AAA", 30))]);
        let out = plan(
            &[intent("AAA", 50)],
            &positions,
            &prices,
            &caps(5, dec!(10.0), dec!(10_000)),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].qty, 20);
    }

    #[test]
    fn test_zero_delta_suppressed() {
        // Scenario D: holding already equals the capped target
        let prices = PriceMap::from([("AAA".to_string(), dec!(10))]);
        let positions = HashMap::from([("AAA".to_string(), position("AAA", 50))]);
        let out = plan(
            &[intent("AAA", 50)],
            &positions,
            &prices,
            &caps(5, dec!(10.0), dec!(10_000)),
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_all_caps_hold_simultaneously() {
        // Scenario A
        let prices = PriceMap::from([
            ("AAA".to_string(), dec!(10.60)),
            ("BBB".to_string(), dec!(5.30)),
        ]);
        let mut c = caps(1, dec!(0.70), dec!(1000));
        c.per_name_cap = Some(dec!(0.50));
        let out = plan(
            &[intent("AAA", 50), intent("BBB", 200)],
            &HashMap::new(),
            &prices,
            &c,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        let chosen = &out[0];
        let dollars = Decimal::from(chosen.qty.abs()) * prices[&chosen.symbol];
        assert!(dollars <= dec!(0.70) * dec!(1000) + dec!(0.000001));
        assert!(dollars <= dec!(0.50) * dec!(1000) + dec!(0.000001));
    }

    #[test]
    fn test_output_never_exceeds_max_positions() {
        let prices: PriceMap = (0..20)
            .map(|i| (format!("S{i:02}"), dec!(5)))
            .collect();
        let intents: Vec<TradeIntent> = (0..20)
            .map(|i| intent(&format!("S{i:02}"), 10 + i))
            .collect();
        for max in 1..=5usize {
            let out = plan(
                &intents,
                &HashMap::new(),
                &prices,
                &caps(max, dec!(100.0), dec!(1_000_000)),
            )
            .unwrap();
            assert!(out.len() <= max);
        }
    }
}
