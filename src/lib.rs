//! vobreakout: end-of-day volatility breakout trading bot
//!
//! This library provides the core components for:
//! - Volatile-universe selection and daily bar fetching
//! - Breakout signal detection and risk-based sizing
//! - Reconciliation of trade intents against holdings with portfolio risk caps
//! - Bracket order construction and paper execution
//! - Historical replay of the breakout rule
//! - Performance metric reporting
//! - Logging and metrics

pub mod backtest;
pub mod broker;
pub mod cli;
pub mod config;
pub mod data;
pub mod execution;
pub mod recon;
pub mod report;
pub mod signal;
pub mod telemetry;
