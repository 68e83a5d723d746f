//! Backtesting module
//!
//! Replays the breakout rule over historical daily bars with a one-position
//! day simulation, producing a daily-return series for the report metrics.

mod simulator;

pub use simulator::{backtest_breakout, simulate_day};

use crate::config::Config;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Backtest configuration
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    /// Breakout threshold over yesterday's high
    pub breakout_threshold: Decimal,
    /// Volume confirmation multiple (non-positive disables it)
    pub vol_multiplier: Decimal,
    /// Stop distance below entry, fraction of price
    pub stop_loss_pct: Decimal,
    /// Trailing-stop activation above entry, fraction of price
    pub trail_start_pct: Decimal,
    /// Trailing distance, fraction of price
    pub trail_pct: Decimal,
    /// Round-trip cost assumption per trade, basis points
    pub cost_bps: Decimal,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            breakout_threshold: dec!(0.012),
            vol_multiplier: dec!(1.5),
            stop_loss_pct: dec!(0.03),
            trail_start_pct: dec!(0.05),
            trail_pct: dec!(0.04),
            cost_bps: dec!(10),
        }
    }
}

impl BacktestConfig {
    /// Create from the loaded configuration, keeping the default cost model.
    pub fn from_config(config: &Config) -> Self {
        Self {
            breakout_threshold: config.signal.breakout_threshold,
            vol_multiplier: config.signal.vol_multiplier,
            stop_loss_pct: config.execution.stop_loss_pct,
            trail_start_pct: config.execution.trail_start_pct,
            trail_pct: config.execution.trail_pct,
            ..Self::default()
        }
    }
}
