//! Twelve Data provider.
//!
//! Fetches OHLCV bars from the Twelve Data time-series endpoint. Handles the
//! provider's quirks: numerics arrive string-encoded, `values` is newest
//! first, volume is absent for spot metals, and errors come back as HTTP 200
//! with `status == "error"`. Retries transient failures with exponential
//! backoff.

use super::provider::{BarProvider, DataError};
use crate::domain::{Bar, PriceSeries};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.twelvedata.com/time_series";

/// Twelve Data time-series response. `status`/`message` double as the error
/// channel; `values` is only present on success.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    status: Option<String>,
    message: Option<String>,
    values: Option<Vec<RawValue>>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: Option<String>,
}

/// Twelve Data client for a single symbol.
pub struct TwelveDataProvider {
    client: reqwest::blocking::Client,
    symbol: String,
    api_key: String,
    max_retries: u32,
    base_delay: Duration,
}

impl TwelveDataProvider {
    /// Build a client for `symbol`. The API key comes from the `TD_API_KEY`
    /// environment variable only; it is never read from config files.
    pub fn new(symbol: impl Into<String>) -> Result<Self, DataError> {
        let api_key = std::env::var("TD_API_KEY")
            .map_err(|_| DataError::ApiError("TD_API_KEY is not set".into()))?;
        Ok(Self::with_api_key(symbol, api_key))
    }

    pub fn with_api_key(symbol: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            symbol: symbol.into(),
            api_key: api_key.into(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn url(&self, interval: &str, output_size: usize) -> String {
        format!(
            "{BASE_URL}?symbol={}&interval={interval}&outputsize={output_size}&apikey={}",
            self.symbol, self.api_key
        )
    }

    /// Parse the response body into ascending bars.
    fn parse_response(symbol: &str, resp: TimeSeriesResponse) -> Result<Vec<Bar>, DataError> {
        if resp.status.as_deref() == Some("error") {
            let message = resp.message.unwrap_or_else(|| "no message".into());
            return Err(DataError::ApiError(format!("{symbol}: {message}")));
        }

        let values = resp
            .values
            .ok_or_else(|| DataError::ResponseFormatChanged("no values array".into()))?;
        if values.is_empty() {
            return Err(DataError::EmptySeries);
        }

        let mut bars = Vec::with_capacity(values.len());
        // Newest first on the wire; reverse into chronological order.
        for value in values.into_iter().rev() {
            bars.push(Bar {
                timestamp: parse_datetime(&value.datetime)?,
                open: parse_price(&value.open, "open")?,
                high: parse_price(&value.high, "high")?,
                low: parse_price(&value.low, "low")?,
                close: parse_price(&value.close, "close")?,
                volume: value
                    .volume
                    .as_deref()
                    .and_then(|v| v.parse::<f64>().ok())
                    .unwrap_or(0.0),
            });
        }
        Ok(bars)
    }

    fn fetch_with_retry(&self, interval: &str, output_size: usize) -> Result<Vec<Bar>, DataError> {
        let url = self.url(interval, output_size);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::ApiError(format!(
                            "HTTP {status} for {}",
                            self.symbol
                        )));
                        continue;
                    }

                    let body: TimeSeriesResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {}: {e}",
                            self.symbol
                        ))
                    })?;
                    return Self::parse_response(&self.symbol, body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::Network(e.to_string()));
                        continue;
                    }
                    return Err(DataError::Network(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Network("max retries exceeded".into())))
    }
}

/// Bar timestamps arrive as "2024-01-02 15:00:00" intraday or "2024-01-02"
/// for daily intervals.
fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        // Invariant: midnight always exists for a valid date.
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight exists").and_utc());
    }
    Err(DataError::ResponseFormatChanged(format!(
        "unparseable datetime: {raw}"
    )))
}

fn parse_price(raw: &str, field: &str) -> Result<f64, DataError> {
    raw.parse::<f64>().map_err(|_| {
        DataError::ResponseFormatChanged(format!("non-numeric {field}: {raw}"))
    })
}

impl BarProvider for TwelveDataProvider {
    fn name(&self) -> &str {
        "twelve_data"
    }

    fn fetch(&self, interval: &str, output_size: usize) -> Result<PriceSeries, DataError> {
        let bars = self.fetch_with_retry(interval, output_size)?;
        Ok(PriceSeries::new(bars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> TimeSeriesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_values_newest_first_into_ascending_bars() {
        let resp = response(
            r#"{
                "status": "ok",
                "values": [
                    {"datetime": "2024-01-02 15:00:00", "open": "2045.1", "high": "2047.9",
                     "low": "2044.0", "close": "2046.5"},
                    {"datetime": "2024-01-02 14:00:00", "open": "2043.0", "high": "2045.5",
                     "low": "2042.1", "close": "2045.1"}
                ]
            }"#,
        );
        let bars = TwelveDataProvider::parse_response("XAU/USD", resp).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].timestamp < bars[1].timestamp);
        assert_eq!(bars[0].close, 2045.1);
        assert_eq!(bars[1].close, 2046.5);
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let resp = response(
            r#"{"values": [{"datetime": "2024-01-02", "open": "2043.0",
                "high": "2045.5", "low": "2042.1", "close": "2045.1"}]}"#,
        );
        let bars = TwelveDataProvider::parse_response("XAU/USD", resp).unwrap();
        assert_eq!(bars[0].volume, 0.0);
    }

    #[test]
    fn daily_datetime_parses_at_midnight() {
        let ts = parse_datetime("2024-01-02").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn error_status_surfaces_the_message() {
        let resp = response(r#"{"status": "error", "message": "Invalid API key"}"#);
        let err = TwelveDataProvider::parse_response("XAU/USD", resp).unwrap_err();
        match err {
            DataError::ApiError(msg) => assert!(msg.contains("Invalid API key")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_values_is_empty_series() {
        let resp = response(r#"{"status": "ok", "values": []}"#);
        let err = TwelveDataProvider::parse_response("XAU/USD", resp).unwrap_err();
        assert!(matches!(err, DataError::EmptySeries));
    }

    #[test]
    fn non_numeric_price_is_a_format_error() {
        let resp = response(
            r#"{"values": [{"datetime": "2024-01-02", "open": "n/a",
                "high": "2045.5", "low": "2042.1", "close": "2045.1"}]}"#,
        );
        let err = TwelveDataProvider::parse_response("XAU/USD", resp).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }
}
