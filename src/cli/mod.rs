//! CLI interface for vobreakout
//!
//! Provides subcommands for:
//! - `rebalance`: run the end-of-day pipeline (signals → caps → orders)
//! - `backtest`: replay the breakout rule over one symbol's history
//! - `config`: show the loaded configuration

mod backtest;
mod rebalance;

pub use backtest::BacktestArgs;
pub use rebalance::RebalanceArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vobreakout")]
#[command(about = "End-of-day volatility breakout trading bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the end-of-day rebalance pipeline
    Rebalance(RebalanceArgs),
    /// Replay the breakout rule over historical bars
    Backtest(BacktestArgs),
    /// Show the loaded configuration
    Config,
}
