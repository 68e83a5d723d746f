//! One-position daily breakout simulation

use super::BacktestConfig;
use crate::signal::{breakout_long, DailyBar};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One-position, one-day outcome given the entry price and next-day OHLC.
///
/// Exit priority: hard stop, then trailing-stop lock-in, then close-to-close.
/// The trail lock-in books at least `trail_start_pct - trail_pct`, the
/// conservative assumption for a trail that activated intraday. Returns a
/// simple (not log) return. Caller guarantees `entry > 0`.
pub fn simulate_day(
    entry: Decimal,
    next_high: Decimal,
    next_low: Decimal,
    next_close: Decimal,
    cfg: &BacktestConfig,
) -> Decimal {
    // Hard stop first
    if (entry - next_low) / entry >= cfg.stop_loss_pct {
        return -cfg.stop_loss_pct;
    }
    // Trail lock-in once the move clears the activation level
    if (next_high - entry) / entry >= cfg.trail_start_pct {
        return (cfg.trail_start_pct - cfg.trail_pct).max(next_close / entry - Decimal::ONE);
    }
    // Otherwise close-to-close
    next_close / entry - Decimal::ONE
}

/// Daily return series for the breakout rule over one symbol's bars.
///
/// A breakout on day T enters at close(T) and resolves on day T+1's OHLC,
/// net of the modeled round-trip cost. Non-signal days return zero. The last
/// bar has no next day and produces no entry, so the series is one shorter
/// than the input; fewer than two bars yield an empty series.
pub fn backtest_breakout(bars: &[DailyBar], cfg: &BacktestConfig) -> Vec<Decimal> {
    if bars.len() < 2 {
        return vec![];
    }

    let sig = breakout_long(bars, cfg.breakout_threshold, cfg.vol_multiplier);
    let cost = cfg.cost_bps / dec!(10000);

    (0..bars.len() - 1)
        .map(|i| {
            let entry = bars[i].close;
            if !sig[i] || entry <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            let next = &bars[i + 1];
            simulate_day(entry, next.high, next.low, next.close, cfg) - cost
        })
        .collect()
}
