//! End-of-day rebalance command
//!
//! The full pipeline: universe → daily bars → breakout intents → position and
//! price snapshots → risk-capped plan → bracket submission. Paper mode holds
//! no broker state, so the snapshot is an empty book and last closes stand in
//! for live prices.

use crate::broker::{self, PositionSnapshot, PriceMap};
use crate::config::{Config, ExecutionMode};
use crate::data::{build_universe, BarsClient, BarsConfig};
use crate::execution::{BracketOrder, ExecutionEngine, PaperEngine};
use crate::recon;
use crate::signal::build_universe_intents;
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use chrono::{Duration, Utc};
use clap::Args;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Args, Debug)]
pub struct RebalanceArgs {
    /// Compute and log the plan without submitting orders
    #[arg(long)]
    pub dry_run: bool,

    /// NAV override in GBP (until NAV is pulled from the broker)
    #[arg(long, default_value = "500")]
    pub nav_gbp: Decimal,

    /// Bars lookback window in days (overrides config)
    #[arg(long)]
    pub days_back: Option<i64>,

    /// Run identifier, defaults to today's date
    #[arg(long)]
    pub run_id: Option<String>,
}

impl RebalanceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y%m%d").to_string());

        let fx = broker::gbp_per_usd();
        let nav_usd = self.nav_gbp / fx;
        let caps = config.risk.caps(nav_usd);
        // Fail fast on a bad risk configuration, before any fetching
        caps.validate()?;

        tracing::info!(
            %run_id,
            nav_gbp = %self.nav_gbp,
            fx_gbp_per_usd = %fx,
            nav_usd = %nav_usd,
            "starting EOD rebalance"
        );
        set_gauge(GaugeMetric::NavUsd, nav_usd.to_f64().unwrap_or(0.0));

        // Universe
        let symbols = build_universe(config.universe.min_price, config.universe.min_atr_pct);
        if symbols.is_empty() {
            anyhow::bail!("universe is empty");
        }
        set_gauge(GaugeMetric::UniverseSize, symbols.len() as f64);

        // Daily bars
        let days_back = self.days_back.unwrap_or(config.data.days_back);
        let end = Utc::now().date_naive();
        let start = end - Duration::days(days_back);
        let client = BarsClient::with_config(BarsConfig {
            base_url: config.data.base_url.clone(),
            retries: config.data.retries,
            concurrency: config.data.concurrency,
            ..BarsConfig::default()
        })?;

        tracing::info!(%start, %end, symbols = symbols.len(), "fetching daily bars");
        let fetch_started = Instant::now();
        let bars_map = client.fetch_daily_many(&symbols, start, end).await;
        record_latency(LatencyMetric::BarsFetch, fetch_started.elapsed());

        // Signals, visited in universe order so the intent sequence (and the
        // planner's tie-breaks) are identical run to run
        let params = config.signal_params();
        let signal_started = Instant::now();
        let intents = build_universe_intents(&symbols, &bars_map, self.nav_gbp, fx, &params);
        record_latency(LatencyMetric::SignalGeneration, signal_started.elapsed());
        set_gauge(GaugeMetric::IntentCount, intents.len() as f64);

        if intents.is_empty() {
            tracing::info!("no signals today, nothing to do");
            return Ok(());
        }

        // Snapshots. Paper mode holds nothing at the broker; last closes are
        // the freshest prices available after the session.
        let positions: HashMap<String, PositionSnapshot> = HashMap::new();
        let prices: PriceMap = bars_map
            .iter()
            .filter_map(|(symbol, bars)| bars.last().map(|b| (symbol.clone(), b.close)))
            .collect();

        // Plan
        let plan_started = Instant::now();
        let child = recon::plan(&intents, &positions, &prices, &caps)?;
        record_latency(LatencyMetric::Reconciliation, plan_started.elapsed());
        set_gauge(GaugeMetric::PlannedOrders, child.len() as f64);

        let gross: Decimal = child
            .iter()
            .map(|t| {
                prices
                    .get(&t.symbol)
                    .map(|px| Decimal::from(t.qty.abs()) * *px)
                    .unwrap_or(Decimal::ZERO)
            })
            .sum();
        set_gauge(GaugeMetric::GrossExposureUsd, gross.to_f64().unwrap_or(0.0));

        for t in &child {
            tracing::info!(
                symbol = %t.symbol,
                qty = t.qty,
                entry_limit = ?t.entry_limit,
                stop_loss = ?t.stop_loss,
                "planned child order"
            );
        }

        if self.dry_run || child.is_empty() {
            tracing::info!("dry run or empty plan, nothing submitted");
            return Ok(());
        }

        if config.execution.mode == ExecutionMode::Live {
            anyhow::bail!("live execution is not wired up; run in paper mode");
        }

        // Submit brackets; one failed order must not sink the rest
        let engine = PaperEngine::new();
        let mut submitted = 0usize;
        for t in &child {
            let Some(bracket) = BracketOrder::from_child(t) else {
                tracing::warn!(symbol = %t.symbol, "child order missing bracket prices, skipped");
                continue;
            };
            let submit_started = Instant::now();
            match engine.place_bracket(&bracket).await {
                Ok(order_id) => {
                    record_latency(LatencyMetric::OrderSubmission, submit_started.elapsed());
                    tracing::info!(%order_id, symbol = %bracket.symbol, "bracket submitted");
                    submitted += 1;
                }
                Err(e) => {
                    tracing::error!(symbol = %bracket.symbol, error = %e, "bracket submit failed");
                }
            }
        }

        tracing::info!(%run_id, submitted, planned = child.len(), "rebalance complete");
        Ok(())
    }
}
