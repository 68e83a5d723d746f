//! Configuration types for vobreakout

use crate::recon::{RiskCaps, UnpricedPolicy};
use crate::signal::SignalParams;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub universe: UniverseConfig,
    pub signal: SignalConfig,
    pub risk: RiskConfig,
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

/// Universe filter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseConfig {
    /// Minimum last price to include a name
    pub min_price: Decimal,
    /// Minimum ATR as a fraction of price
    pub min_atr_pct: Decimal,
}

/// Breakout signal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    /// Threshold over yesterday's high
    pub breakout_threshold: Decimal,
    /// Volume confirmation multiple (non-positive disables it)
    pub vol_multiplier: Decimal,
}

/// Risk budget and portfolio caps
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Fraction of NAV risked per trade
    pub per_trade_risk: Decimal,
    /// Maximum concurrent target positions
    pub max_positions: usize,
    /// Gross exposure ceiling as a fraction of NAV
    pub max_gross_exposure: Decimal,
    /// Optional per-name ceiling as a fraction of NAV
    #[serde(default)]
    pub per_name_cap: Option<Decimal>,
    /// Policy for symbols with no tradable price
    #[serde(default)]
    pub unpriced: UnpricedPolicy,
}

impl RiskConfig {
    /// Planner caps scaled to a NAV.
    pub fn caps(&self, nav: Decimal) -> RiskCaps {
        RiskCaps {
            max_positions: self.max_positions,
            max_gross_exposure: self.max_gross_exposure,
            nav,
            per_name_cap: self.per_name_cap,
            unpriced: self.unpriced,
        }
    }
}

/// Execution and bracket configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    pub mode: ExecutionMode,
    /// Stop distance below entry, fraction of price
    pub stop_loss_pct: Decimal,
    /// Trailing-stop activation above entry, fraction of price
    pub trail_start_pct: Decimal,
    /// Trailing distance, fraction of price
    pub trail_pct: Decimal,
    /// Entry limit above last close, fraction of price
    pub entry_limit_pct: Decimal,
}

/// Execution mode: paper trading or live
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Paper,
    Live,
}

/// Market data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Aggregates API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bars lookback window in calendar days
    #[serde(default = "default_days_back")]
    pub days_back: i64,
    /// Concurrent symbol fetches
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Retries on 429/5xx
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_base_url() -> String {
    crate::data::POLYGON_API_URL.to_string()
}
fn default_days_back() -> i64 {
    60
}
fn default_concurrency() -> usize {
    8
}
fn default_retries() -> u32 {
    3
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            days_back: 60,
            concurrency: 8,
            retries: 3,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus listener port; 0 disables the exporter
    pub metrics_port: u16,
    pub log_level: String,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Signal-stage parameters assembled across config sections.
    pub fn signal_params(&self) -> SignalParams {
        SignalParams {
            breakout_threshold: self.signal.breakout_threshold,
            vol_multiplier: self.signal.vol_multiplier,
            per_trade_risk: self.risk.per_trade_risk,
            stop_loss_pct: self.execution.stop_loss_pct,
            trail_start_pct: self.execution.trail_start_pct,
            trail_pct: self.execution.trail_pct,
            entry_limit_pct: self.execution.entry_limit_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EXAMPLE: &str = r#"
        [universe]
        min_price = 2.0
        min_atr_pct = 0.03

        [signal]
        breakout_threshold = 0.012
        vol_multiplier = 1.5

        [risk]
        per_trade_risk = 0.015
        max_positions = 5
        max_gross_exposure = 0.70
        per_name_cap = 0.25

        [execution]
        mode = "paper"
        stop_loss_pct = 0.03
        trail_start_pct = 0.05
        trail_pct = 0.04
        entry_limit_pct = 0.005

        [data]
        days_back = 60
        concurrency = 8

        [telemetry]
        metrics_port = 9090
        log_level = "info"
    "#;

    #[test]
    fn test_config_deserialize() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.risk.max_positions, 5);
        assert_eq!(config.risk.per_name_cap, Some(dec!(0.25)));
        assert_eq!(config.execution.mode, ExecutionMode::Paper);
        assert_eq!(config.data.retries, 3); // defaulted
    }

    #[test]
    fn test_unpriced_policy_defaults_to_pass_through() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.risk.unpriced, UnpricedPolicy::PassThrough);
    }

    #[test]
    fn test_unpriced_policy_skip() {
        let toml = EXAMPLE.replace("per_name_cap = 0.25", "unpriced = \"skip\"");
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.risk.unpriced, UnpricedPolicy::Skip);
        assert_eq!(config.risk.per_name_cap, None);
    }

    #[test]
    fn test_caps_from_risk_config() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        let caps = config.risk.caps(dec!(1000));
        assert_eq!(caps.nav, dec!(1000));
        assert_eq!(caps.max_positions, 5);
        assert_eq!(caps.max_gross_exposure, dec!(0.70));
        assert!(caps.validate().is_ok());
    }

    #[test]
    fn test_signal_params_assembly() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        let params = config.signal_params();
        assert_eq!(params.breakout_threshold, dec!(0.012));
        assert_eq!(params.per_trade_risk, dec!(0.015));
        assert_eq!(params.stop_loss_pct, dec!(0.03));
    }

    #[test]
    fn test_config_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.telemetry.metrics_port, 9090);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }
}
