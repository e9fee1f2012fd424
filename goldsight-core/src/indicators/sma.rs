//! Simple Moving Average (SMA).
//!
//! Trailing arithmetic mean of close prices.
//! Warm-up: period - 1 (first defined value at index period-1).

use super::rolling::{from_values, rolling_mean};
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes = from_values(&bars.iter().map(|b| b.close).collect::<Vec<_>>());
        rolling_mean(&closes, self.period)
    }
}
