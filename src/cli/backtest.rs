//! Historical backtest command
//!
//! Replays the breakout rule over one symbol's daily bars and prints the
//! headline performance statistics.

use crate::backtest::{backtest_breakout, BacktestConfig};
use crate::config::Config;
use crate::data::{BarsClient, BarsConfig};
use crate::report;
use chrono::{Duration, Utc};
use clap::Args;
use rust_decimal::prelude::ToPrimitive;

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Symbol to replay
    #[arg(long)]
    pub symbol: String,

    /// Bars lookback window in days (overrides config)
    #[arg(long)]
    pub days_back: Option<i64>,
}

impl BacktestArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let days_back = self.days_back.unwrap_or(config.data.days_back);
        let end = Utc::now().date_naive();
        let start = end - Duration::days(days_back);

        let client = BarsClient::with_config(BarsConfig {
            base_url: config.data.base_url.clone(),
            retries: config.data.retries,
            concurrency: config.data.concurrency,
            ..BarsConfig::default()
        })?;

        tracing::info!(symbol = %self.symbol, %start, %end, "fetching daily bars");
        let bars = client.fetch_daily(&self.symbol, start, end).await;
        if bars.len() < 2 {
            anyhow::bail!("not enough bars for {} ({} fetched)", self.symbol, bars.len());
        }

        let bt = BacktestConfig::from_config(config);
        let rets = backtest_breakout(&bars, &bt);
        let daily: Vec<f64> = rets.iter().map(|r| r.to_f64().unwrap_or(0.0)).collect();
        let perf = report::performance(&daily);

        println!("Backtest: {} ({} bars, {} tradeable days)", self.symbol, bars.len(), rets.len());
        println!("  Trades:    {}", perf.n_trades);
        println!("  Ann ret:   {:.2}%", perf.ann_ret * 100.0);
        println!("  Ann vol:   {:.2}%", perf.ann_vol * 100.0);
        println!("  Sharpe:    {:.2}", perf.sharpe);
        println!("  Sortino:   {:.2}", perf.sortino);
        println!("  Max DD:    {:.2}%", perf.max_dd * 100.0);
        println!("  Calmar:    {:.2}", perf.calmar);
        println!("  Win rate:  {:.1}%", perf.win_rate * 100.0);
        println!("  Avg win:   {:.3}%", perf.avg_win * 100.0);
        println!("  Avg loss:  {:.3}%", perf.avg_loss * 100.0);
        Ok(())
    }
}
