//! Telemetry module
//!
//! Structured logging and Prometheus metrics.

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{record_latency, set_gauge, GaugeMetric, LatencyMetric};

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

/// Guard that keeps telemetry alive for the process lifetime
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems.
///
/// The metrics listener needs a running tokio runtime; call from async
/// context. A port of 0 disables the exporter (useful in tests).
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level)?;

    if config.metrics_port != 0 {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        tracing::info!(%addr, "prometheus exporter listening");
    }

    Ok(TelemetryGuard { _priv: () })
}
