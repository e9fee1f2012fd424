//! PriceSeries — an ordered, timestamp-validated bar sequence.

use super::Bar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("timestamps not strictly increasing at index {index}")]
    OutOfOrder { index: usize },
}

/// An ordered sequence of bars with strictly increasing timestamps.
///
/// Contiguity is not guaranteed (weekend and session gaps are normal); only
/// ordering and uniqueness are enforced. The series owns its bars; pipeline
/// components borrow slices and never mutate price fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validate ordering and wrap the bars. Empty input is rejected — an
    /// absent series is a hard stop for the evaluation cycle.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::OutOfOrder { index: i + 1 });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent `n` bars (the whole series when shorter).
    pub fn window(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn last(&self) -> &Bar {
        // Invariant: the constructor rejects empty input.
        self.bars.last().expect("PriceSeries is never empty")
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
