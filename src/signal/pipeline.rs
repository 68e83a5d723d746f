//! Per-symbol intent pipeline
//!
//! Daily bars in, at most one risk-sized breakout intent out. NAV arrives in
//! GBP and is converted to USD so quantities land on the same scale as the
//! USD price map the planner sees.

use super::{breakout_long, risk_sized_qty, DailyBar};
use crate::recon::TradeIntent;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Strategy tag stamped on every generated intent
pub const STRATEGY_TAG: &str = "VOBREAKOUT";

/// Bars required before the 20-day rolling windows are trustworthy
const MIN_HISTORY: usize = 25;

/// Signal and bracket parameters, one value per config knob.
#[derive(Debug, Clone)]
pub struct SignalParams {
    /// Breakout threshold over yesterday's high
    pub breakout_threshold: Decimal,
    /// Volume confirmation multiple (non-positive disables the check)
    pub vol_multiplier: Decimal,
    /// Fraction of NAV risked per trade
    pub per_trade_risk: Decimal,
    /// Stop distance below entry, fraction of price
    pub stop_loss_pct: Decimal,
    /// Trailing-stop activation above entry, fraction of price
    pub trail_start_pct: Decimal,
    /// Trailing distance, fraction of price
    pub trail_pct: Decimal,
    /// Entry limit above last close, fraction of price
    pub entry_limit_pct: Decimal,
}

/// Build breakout intents for one symbol from its daily bars.
///
/// Empty when history is too short, the last bar does not signal, or sizing
/// rounds down to zero shares.
pub fn build_intents(
    symbol: &str,
    bars: &[DailyBar],
    nav_gbp: Decimal,
    fx_gbp_per_usd: Decimal,
    params: &SignalParams,
) -> Vec<TradeIntent> {
    if bars.len() < MIN_HISTORY {
        return vec![];
    }

    let signals = breakout_long(bars, params.breakout_threshold, params.vol_multiplier);
    if !signals.last().copied().unwrap_or(false) {
        return vec![];
    }

    let px = bars[bars.len() - 1].close;

    let fx = if fx_gbp_per_usd > Decimal::ZERO {
        fx_gbp_per_usd
    } else {
        dec!(0.78)
    };
    let nav_usd = nav_gbp / fx;

    let qty = risk_sized_qty(nav_usd, px, params.per_trade_risk, params.stop_loss_pct);
    if qty <= 0 {
        return vec![];
    }

    vec![TradeIntent {
        symbol: symbol.to_string(),
        qty,
        entry_limit: Some(px * (Decimal::ONE + params.entry_limit_pct)),
        stop_loss: Some(px * (Decimal::ONE - params.stop_loss_pct)),
        trail_start: Some(px * (Decimal::ONE + params.trail_start_pct)),
        trail_pct: Some(params.trail_pct),
        tag: STRATEGY_TAG.to_string(),
    }]
}

/// Build intents for a whole universe, in universe order.
///
/// The planner's dedup and ranking tie-breaks are input-order sensitive, so
/// the intent sequence must be deterministic: symbols are visited in the
/// order given here, never in map iteration order. Symbols without bars are
/// skipped.
pub fn build_universe_intents(
    symbols: &[String],
    bars_map: &HashMap<String, Vec<DailyBar>>,
    nav_gbp: Decimal,
    fx_gbp_per_usd: Decimal,
    params: &SignalParams,
) -> Vec<TradeIntent> {
    let mut intents = Vec::new();
    for symbol in symbols {
        if let Some(bars) = bars_map.get(symbol) {
            intents.extend(build_intents(symbol, bars, nav_gbp, fx_gbp_per_usd, params));
        }
    }
    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn test_params() -> SignalParams {
        SignalParams {
            breakout_threshold: dec!(0.012),
            vol_multiplier: dec!(1.5),
            per_trade_risk: dec!(0.015),
            stop_loss_pct: dec!(0.03),
            trail_start_pct: dec!(0.05),
            trail_pct: dec!(0.04),
            entry_limit_pct: dec!(0.005),
        }
    }

    fn series(n: usize, breakout: bool) -> Vec<DailyBar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut bars: Vec<DailyBar> = (0..n)
            .map(|i| DailyBar {
                ts: start + Duration::days(i as i64),
                open: dec!(9.8),
                high: dec!(10.5),
                low: dec!(9.5),
                close: dec!(10),
                volume: dec!(1000000),
            })
            .collect();
        if breakout {
            let last = bars.len() - 1;
            bars[last].high = dec!(10.5) * dec!(1.02);
            bars[last].close = bars[last].high;
            bars[last].volume = dec!(2000000);
        }
        bars
    }

    #[test]
    fn test_no_signal_no_intents() {
        let intents = build_intents("TEST", &series(40, false), dec!(500), dec!(0.80), &test_params());
        assert!(intents.is_empty());
    }

    #[test]
    fn test_signal_produces_single_buy_intent() {
        let intents = build_intents("TEST", &series(40, true), dec!(500), dec!(0.80), &test_params());
        assert_eq!(intents.len(), 1);
        let t = &intents[0];
        assert_eq!(t.symbol, "TEST");
        assert!(t.qty > 0);
        assert_eq!(t.tag, STRATEGY_TAG);
        let px = dec!(10.5) * dec!(1.02);
        assert_eq!(t.entry_limit, Some(px * dec!(1.005)));
        assert_eq!(t.stop_loss, Some(px * dec!(0.97)));
        assert_eq!(t.trail_start, Some(px * dec!(1.05)));
        assert_eq!(t.trail_pct, Some(dec!(0.04)));
    }

    #[test]
    fn test_short_history_skipped() {
        let intents = build_intents("TEST", &series(10, true), dec!(500), dec!(0.80), &test_params());
        assert!(intents.is_empty());
    }

    #[test]
    fn test_zero_size_skipped() {
        // Tiny NAV: risk budget rounds below one share
        let intents = build_intents("TEST", &series(40, true), dec!(1), dec!(0.80), &test_params());
        assert!(intents.is_empty());
    }

    #[test]
    fn test_universe_intents_follow_symbol_order() {
        let bars_map = HashMap::from([
            ("AAA".to_string(), series(40, true)),
            ("BBB".to_string(), series(40, true)),
            ("CCC".to_string(), series(40, false)),
        ]);
        let symbols: Vec<String> =
            ["BBB", "CCC", "AAA"].iter().map(|s| s.to_string()).collect();

        let intents =
            build_universe_intents(&symbols, &bars_map, dec!(500), dec!(0.80), &test_params());
        let order: Vec<&str> = intents.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(order, vec!["BBB", "AAA"]);

        // Same inputs, same sequence, every run
        let again =
            build_universe_intents(&symbols, &bars_map, dec!(500), dec!(0.80), &test_params());
        assert_eq!(intents, again);
    }

    #[test]
    fn test_universe_intents_skip_missing_bars() {
        let bars_map = HashMap::from([("AAA".to_string(), series(40, true))]);
        let symbols: Vec<String> = ["ZZZ", "AAA"].iter().map(|s| s.to_string()).collect();
        let intents =
            build_universe_intents(&symbols, &bars_map, dec!(500), dec!(0.80), &test_params());
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].symbol, "AAA");
    }

    #[test]
    fn test_fx_fallback_on_invalid_rate() {
        let with_default = build_intents("TEST", &series(40, true), dec!(500), dec!(0), &test_params());
        let with_explicit =
            build_intents("TEST", &series(40, true), dec!(500), dec!(0.78), &test_params());
        assert_eq!(with_default, with_explicit);
    }
}
