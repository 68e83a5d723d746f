//! Signal generation
//!
//! Breakout detection, ATR, risk-based sizing and the per-symbol pipeline
//! that turns daily bars into trade intents.

mod breakout;
mod pipeline;
mod sizing;
mod types;

pub use breakout::{atr_pct, breakout_long};
pub use pipeline::{build_intents, build_universe_intents, SignalParams, STRATEGY_TAG};
pub use sizing::risk_sized_qty;
pub use types::DailyBar;
