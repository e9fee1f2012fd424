//! Stochastic RSI — RSI normalized into [0, 1] by its own trailing range.
//!
//! stoch = (RSI - min(RSI, period)) / (max(RSI, period) - min(RSI, period))
//! %K = SMA(stoch, smooth_k), %D = SMA(%K, smooth_d)
//!
//! A flat RSI window (max == min) has no defined normalization and yields
//! `None` rather than a division by zero.

use super::rolling::{rolling_max, rolling_mean, rolling_min};
use super::rsi::rsi_series;
use super::Indicator;
use crate::domain::Bar;

/// Which smoothed line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochRsiLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct StochRsi {
    period: usize,
    smooth_k: usize,
    smooth_d: usize,
    line: StochRsiLine,
    name: String,
}

impl StochRsi {
    pub fn k(period: usize, smooth_k: usize, smooth_d: usize) -> Self {
        Self::with_line(period, smooth_k, smooth_d, StochRsiLine::K, "stochrsi_k")
    }

    pub fn d(period: usize, smooth_k: usize, smooth_d: usize) -> Self {
        Self::with_line(period, smooth_k, smooth_d, StochRsiLine::D, "stochrsi_d")
    }

    fn with_line(
        period: usize,
        smooth_k: usize,
        smooth_d: usize,
        line: StochRsiLine,
        name: &str,
    ) -> Self {
        assert!(period >= 1 && smooth_k >= 1 && smooth_d >= 1, "StochRSI periods must be >= 1");
        Self {
            period,
            smooth_k,
            smooth_d,
            line,
            name: name.to_string(),
        }
    }

    fn k_values(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = rsi_series(&closes, self.period);
        let min = rolling_min(&rsi, self.period);
        let max = rolling_max(&rsi, self.period);

        let stoch: Vec<Option<f64>> = rsi
            .iter()
            .zip(min.iter().zip(max.iter()))
            .map(|(r, (lo, hi))| match (r, lo, hi) {
                (Some(r), Some(lo), Some(hi)) => {
                    let range = hi - lo;
                    if range == 0.0 {
                        None
                    } else {
                        Some((r - lo) / range)
                    }
                }
                _ => None,
            })
            .collect();

        rolling_mean(&stoch, self.smooth_k)
    }
}

impl Indicator for StochRsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        // RSI defines at `period`, its rolling range adds `period - 1`, the
        // %K smoothing adds `smooth_k - 1`.
        let k_warmup = (2 * self.period - 1) + (self.smooth_k - 1);
        match self.line {
            StochRsiLine::K => k_warmup,
            StochRsiLine::D => k_warmup + self.smooth_d.saturating_sub(1),
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let k = self.k_values(bars);
        match self.line {
            StochRsiLine::K => k,
            StochRsiLine::D => rolling_mean(&k, self.smooth_d),
        }
    }
}
