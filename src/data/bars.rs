//! Daily OHLCV bars from the Polygon aggregates API
//!
//! Fetch failures never abort a run: a symbol that can't be fetched maps to
//! an empty bar list and the pipeline skips it. 429 and 5xx responses are
//! retried with exponential backoff; other failures give up immediately.

use crate::signal::DailyBar;
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::{stream, StreamExt};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Polygon API base URL
pub const POLYGON_API_URL: &str = "https://api.polygon.io";

/// Base delay for exponential backoff between retries
const RETRY_BACKOFF: Duration = Duration::from_millis(800);

/// Configuration for the bars client
#[derive(Debug, Clone)]
pub struct BarsConfig {
    /// Base URL for the aggregates API
    pub base_url: String,
    /// API key; empty disables fetching entirely
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Retries after the first attempt for 429/5xx
    pub retries: u32,
    /// Concurrent in-flight symbol fetches
    pub concurrency: usize,
}

impl Default for BarsConfig {
    fn default() -> Self {
        Self {
            base_url: POLYGON_API_URL.to_string(),
            api_key: std::env::var("POLYGON_API_KEY").unwrap_or_default(),
            timeout: Duration::from_secs(30),
            retries: 3,
            concurrency: 8,
        }
    }
}

/// Client for Polygon daily aggregates
pub struct BarsClient {
    config: BarsConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AggResponse {
    #[serde(default)]
    results: Vec<AggRow>,
}

/// Polygon aggregate row: t (ms epoch), o/h/l/c prices, v volume
#[derive(Debug, Deserialize)]
struct AggRow {
    t: i64,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: f64,
}

impl AggRow {
    fn into_bar(self) -> Option<DailyBar> {
        let ts: DateTime<Utc> = DateTime::from_timestamp_millis(self.t)?;
        Some(DailyBar {
            ts,
            open: Decimal::from_f64(self.o)?,
            high: Decimal::from_f64(self.h)?,
            low: Decimal::from_f64(self.l)?,
            close: Decimal::from_f64(self.c)?,
            volume: Decimal::from_f64(self.v)?,
        })
    }
}

impl BarsClient {
    /// Create a client with default configuration (key from `POLYGON_API_KEY`)
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(BarsConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: BarsConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn agg_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true&sort=asc&limit=50000&apiKey={}",
            self.config.base_url, symbol, start, end, self.config.api_key
        )
    }

    /// GET with retries on 429/5xx. `None` on exhaustion or non-retryable
    /// failure; the caller degrades to an empty bar list.
    async fn get_with_retries(&self, url: &str) -> Option<AggResponse> {
        for attempt in 0..=self.config.retries {
            match self.client.get(url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        match resp.json::<AggResponse>().await {
                            Ok(body) => return Some(body),
                            Err(e) => {
                                tracing::warn!(error = %e, "bad aggregates payload");
                                return None;
                            }
                        }
                    }
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if !retryable {
                        tracing::warn!(status = %status, "aggregates request rejected");
                        return None;
                    }
                    tracing::debug!(status = %status, attempt, "retryable aggregates error");
                }
                Err(e) => {
                    tracing::debug!(error = %e, attempt, "aggregates request failed");
                }
            }
            if attempt < self.config.retries {
                tokio::time::sleep(RETRY_BACKOFF * 2u32.pow(attempt)).await;
            }
        }
        None
    }

    /// Fetch daily bars for one symbol. Empty on any failure or missing key.
    pub async fn fetch_daily(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<DailyBar> {
        if self.config.api_key.is_empty() {
            return vec![];
        }
        let url = self.agg_url(symbol, start, end);
        match self.get_with_retries(&url).await {
            Some(body) => body.results.into_iter().filter_map(AggRow::into_bar).collect(),
            None => vec![],
        }
    }

    /// Fetch daily bars for many symbols with bounded concurrency.
    ///
    /// Every requested symbol appears in the result; failed lookups map to
    /// empty bar lists.
    pub async fn fetch_daily_many(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> HashMap<String, Vec<DailyBar>> {
        if self.config.api_key.is_empty() {
            return symbols.iter().map(|s| (s.clone(), vec![])).collect();
        }

        stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let bars = self.fetch_daily(&symbol, start, end).await;
                (symbol, bars)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await
    }
}
