//! Data provider trait and structured error types.
//!
//! `BarProvider` abstracts over bar sources (Twelve Data, CSV import) so the
//! pipeline can swap implementations and mock for tests.

use crate::domain::{PriceSeries, SeriesError};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider rejected the request: {0}")]
    ApiError(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider returned no bars")]
    EmptySeries,

    #[error("csv import error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SeriesError> for DataError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::Empty => DataError::EmptySeries,
            SeriesError::OutOfOrder { index } => DataError::ResponseFormatChanged(format!(
                "bars not strictly increasing at index {index}"
            )),
        }
    }
}

/// Trait for bar providers.
///
/// An empty or unparseable response is a hard stop for the evaluation cycle;
/// implementations return `DataError` rather than a degenerate series.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch up to `output_size` bars at the given interval, oldest first.
    fn fetch(&self, interval: &str, output_size: usize) -> Result<PriceSeries, DataError>;
}
