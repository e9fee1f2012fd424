//! Rolling VWAP — volume-weighted average of the typical price.
//!
//! vwap = sum(typical * volume, window) / sum(volume, window)
//!
//! Spot metals feeds often report zero volume; a window whose volume sums to
//! zero has no defined VWAP and yields `None` instead of dividing by zero.
//! Warm-up: window - 1.

use super::rolling::{from_values, rolling_sum};
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Vwap {
    window: usize,
    name: String,
}

impl Vwap {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "VWAP window must be >= 1");
        Self {
            window,
            name: format!("vwap_{window}"),
        }
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let weighted: Vec<f64> = bars.iter().map(|b| b.typical_price() * b.volume).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let weighted_sum = rolling_sum(&from_values(&weighted), self.window);
        let volume_sum = rolling_sum(&from_values(&volumes), self.window);

        weighted_sum
            .iter()
            .zip(volume_sum.iter())
            .map(|(w, v)| match (w, v) {
                (Some(w), Some(v)) if *v > 0.0 => Some(w / v),
                _ => None,
            })
            .collect()
    }
}
