//! Indodax public REST API client.

use crate::error::FeedError;
use serde::Deserialize;
use std::time::Duration;
use tickwatch_core::{Pair, Tick};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://indodax.com";

/// Bounded request timeout so a hung request cannot starve the rate limiter.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Indodax public ticker API.
///
/// Unauthenticated, best-effort JSON over HTTP: one pairs endpoint fetched at
/// startup and one ticker endpoint fetched per pair per round.
pub struct IndodaxClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for IndodaxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IndodaxClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the full list of tradable symbols, in exchange order.
    ///
    /// Called once per process start and once per reconnect cycle; the full
    /// list fits one response, there is no pagination.
    pub async fn fetch_pairs(&self) -> Result<Vec<Pair>, FeedError> {
        #[derive(Debug, Deserialize)]
        struct PairEntry {
            symbol: String,
        }

        let url = format!("{}/api/pairs", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let entries: Vec<PairEntry> = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;
        let pairs: Vec<Pair> = entries.iter().map(|e| Pair::new(&e.symbol)).collect();

        debug!("Indodax: fetched {} pairs", pairs.len());
        Ok(pairs)
    }

    /// Fetch the latest price and IDR volume for one pair.
    pub async fn fetch_ticker(&self, pair: &Pair) -> Result<Tick, FeedError> {
        let url = format!("{}/api/ticker/{}", self.base_url, pair.ticker_symbol());
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;
        let (price, volume) = parse_ticker(&json)?;
        Ok(Tick::new(price, volume))
    }

    /// Reachability probe: one pairs request, returning its latency.
    pub async fn ping(&self) -> Result<Duration, FeedError> {
        let url = format!("{}/api/pairs", self.base_url);
        let started = std::time::Instant::now();
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }
        Ok(started.elapsed())
    }
}

/// Extract (last price, IDR volume) from a ticker response.
///
/// The API reports numbers as strings; a missing or malformed field reads as
/// zero, matching how the exchange's own clients treat sparse tickers. Zero
/// prices are handled downstream by the baseline division guard.
fn parse_ticker(json: &serde_json::Value) -> Result<(f64, f64), FeedError> {
    let ticker = json
        .get("ticker")
        .ok_or_else(|| FeedError::ParseError("missing ticker object".to_string()))?;

    let price = numeric_field(ticker, "last");
    let volume = numeric_field(ticker, "vol_idr");
    Ok((price, volume))
}

fn numeric_field(ticker: &serde_json::Value, key: &str) -> f64 {
    match &ticker[key] {
        serde_json::Value::String(s) => s.parse().unwrap_or(0.0),
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ticker_string_fields() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{"ticker":{"last":"1052000000","vol_idr":"483912847123","high":"1060000000"}}"#,
        )
        .unwrap();
        let (price, volume) = parse_ticker(&json).unwrap();
        assert_eq!(price, 1_052_000_000.0);
        assert_eq!(volume, 483_912_847_123.0);
    }

    #[test]
    fn test_parse_ticker_numeric_fields() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"ticker":{"last":0.0042,"vol_idr":120000}}"#).unwrap();
        let (price, volume) = parse_ticker(&json).unwrap();
        assert_eq!(price, 0.0042);
        assert_eq!(volume, 120_000.0);
    }

    #[test]
    fn test_parse_ticker_missing_fields_read_zero() {
        let json: serde_json::Value = serde_json::from_str(r#"{"ticker":{}}"#).unwrap();
        let (price, volume) = parse_ticker(&json).unwrap();
        assert_eq!(price, 0.0);
        assert_eq!(volume, 0.0);
    }

    #[test]
    fn test_parse_ticker_missing_object_is_error() {
        let json: serde_json::Value = serde_json::from_str(r#"{"error":"invalid pair"}"#).unwrap();
        assert!(parse_ticker(&json).is_err());
    }
}
