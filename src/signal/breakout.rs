//! Volatility breakout detection over daily bars
//!
//! The entry rule: today's high exceeds yesterday's high by a threshold
//! fraction, optionally confirmed by volume running above its 20-bar average.
//! Positions before a full rolling window never signal.

use super::DailyBar;
use rust_decimal::Decimal;

/// Rolling window for the volume confirmation average
const VOLUME_WINDOW: usize = 20;

/// ATR as a fraction of close, per bar. Bars before a full `n`-bar true-range
/// window (or with a non-positive close) report zero.
pub fn atr_pct(bars: &[DailyBar], n: usize) -> Vec<Decimal> {
    if n == 0 || bars.is_empty() {
        return vec![Decimal::ZERO; bars.len()];
    }

    let tr: Vec<Decimal> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let hl = bar.high - bar.low;
            if i == 0 {
                return hl;
            }
            let prev_close = bars[i - 1].close;
            let hc = (bar.high - prev_close).abs();
            let lc = (bar.low - prev_close).abs();
            hl.max(hc).max(lc)
        })
        .collect();

    tr.iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < n || bars[i].close <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            let window = &tr[i + 1 - n..=i];
            let sum: Decimal = window.iter().copied().sum();
            sum / Decimal::from(n as u64) / bars[i].close
        })
        .collect()
}

/// Per-bar long breakout flags.
///
/// A bar breaks out when its high exceeds the previous high times
/// `1 + theta`. With `vol_mult > 0` the bar must also print volume above
/// `vol_mult` times its 20-bar average volume; otherwise the volume check is
/// skipped entirely.
pub fn breakout_long(bars: &[DailyBar], theta: Decimal, vol_mult: Decimal) -> Vec<bool> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                return false;
            }
            let level = bars[i - 1].high * (Decimal::ONE + theta);
            let broke = bar.high > level;
            if vol_mult <= Decimal::ZERO {
                return broke;
            }
            if i + 1 < VOLUME_WINDOW {
                return false;
            }
            let window = &bars[i + 1 - VOLUME_WINDOW..=i];
            let avg_vol: Decimal = window.iter().map(|b| b.volume).sum::<Decimal>()
                / Decimal::from(VOLUME_WINDOW as u64);
            broke && bar.volume > vol_mult * avg_vol
        })
        .collect()
}
