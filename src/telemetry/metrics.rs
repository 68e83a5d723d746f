//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Daily-bars fetch per run
    BarsFetch,
    /// Signal + sizing pass per run
    SignalGeneration,
    /// Planner call
    Reconciliation,
    /// Bracket submission per order
    OrderSubmission,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// NAV in USD for the run
    NavUsd,
    /// Scanned universe size
    UniverseSize,
    /// Intents out of the signal stage
    IntentCount,
    /// Child orders out of the planner
    PlannedOrders,
    /// Intended gross exposure in USD after capping
    GrossExposureUsd,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::BarsFetch => "vobreakout_bars_fetch_latency_ms",
            LatencyMetric::SignalGeneration => "vobreakout_signal_generation_latency_ms",
            LatencyMetric::Reconciliation => "vobreakout_reconciliation_latency_ms",
            LatencyMetric::OrderSubmission => "vobreakout_order_submission_latency_ms",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::NavUsd => "vobreakout_nav_usd",
            GaugeMetric::UniverseSize => "vobreakout_universe_size",
            GaugeMetric::IntentCount => "vobreakout_intent_count",
            GaugeMetric::PlannedOrders => "vobreakout_planned_orders",
            GaugeMetric::GrossExposureUsd => "vobreakout_gross_exposure_usd",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    metrics::histogram!(metric.name()).record(duration.as_millis() as f64);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(metric.name()).set(value);
}
