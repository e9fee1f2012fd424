//! CSV import for offline backtests.
//!
//! Expected header: `timestamp,open,high,low,close,volume` with RFC 3339
//! timestamps. The volume column is optional; absent values read as 0.

use super::provider::DataError;
use crate::domain::{Bar, PriceSeries};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

impl From<CsvRecord> for Bar {
    fn from(r: CsvRecord) -> Self {
        Bar {
            timestamp: r.timestamp,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        }
    }
}

/// Read a bar history from a CSV file and validate it into a series.
pub fn read_csv(path: &Path) -> Result<PriceSeries, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for record in reader.deserialize::<CsvRecord>() {
        bars.push(record?.into());
    }
    Ok(PriceSeries::new(bars)?)
}

/// Parse CSV text already in memory (used by tests and stdin pipelines).
pub fn read_csv_str(text: &str) -> Result<PriceSeries, DataError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut bars = Vec::new();
    for record in reader.deserialize::<CsvRecord>() {
        bars.push(record?.into());
    }
    Ok(PriceSeries::new(bars)?)
}
