//! Performance reporting

mod metrics;

pub use metrics::{cum_returns, drawdown, performance, Perf, ANN_DAYS};
