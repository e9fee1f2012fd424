//! Relative Strength Index (RSI).
//!
//! Gains and losses come from one-bar close diffs; both are averaged with a
//! trailing simple mean over `period` (not Wilder smoothing — this matches
//! the rolling-mean RSI the rest of the pipeline was calibrated against).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge case: avg_loss == 0 → RSI = 100 (covers the flat-window 0/0 case).
//! Warm-up: period (the first diff lands at index 1).

use super::rolling::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

/// RSI over a raw close slice. Shared with the Stochastic RSI, which
/// normalizes this output.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut gains: Vec<Option<f64>> = vec![None; n];
    let mut losses: Vec<Option<f64>> = vec![None; n];
    for i in 1..n {
        let diff = closes[i] - closes[i - 1];
        gains[i] = Some(diff.max(0.0));
        losses[i] = Some((-diff).max(0.0));
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(g, l)| match (g, l) {
            (Some(gain), Some(loss)) => {
                if *loss == 0.0 {
                    Some(100.0)
                } else {
                    Some(100.0 - 100.0 / (1.0 + gain / loss))
                }
            }
            _ => None,
        })
        .collect()
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rsi_series(&closes, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3].unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(result[5].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3].unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_series_is_100() {
        // All diffs zero: avg_loss == 0 takes the defined edge value.
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Diffs: +0.34, -0.25, -0.48, +0.72
        // At index 3 (period 3): avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73)
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = Rsi::new(3).compute(&bars);

        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!(result[2].is_none());
        let expected = 100.0 - 100.0 / (1.0 + 0.34 / 0.73);
        assert_approx(result[3].unwrap(), expected, 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&bars);
        for (i, v) in result.iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_too_few_bars_is_all_undefined() {
        let bars = make_bars(&[100.0, 101.0]);
        let result = Rsi::new(14).compute(&bars);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn rsi_warmup() {
        assert_eq!(Rsi::new(14).warmup(), 14);
    }
}
