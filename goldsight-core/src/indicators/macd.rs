//! MACD — Moving Average Convergence/Divergence.
//!
//! macd = EMA(close, fast) - EMA(close, slow)
//! signal = EMA(macd, signal_period), over the already-optional macd series
//! histogram = macd - signal
//!
//! All three lines share the crate's single EMA kernel. The macd line is
//! undefined until both EMAs are defined; the signal line needs a further
//! `signal_period` of defined macd values.

use super::rolling::{ema_of_options, from_values, sub};
use super::Indicator;
use crate::domain::Bar;

/// Which MACD output line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal_period: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal_period: usize) -> Self {
        Self::with_line(fast, slow, signal_period, MacdLine::Macd, "macd")
    }

    pub fn signal(fast: usize, slow: usize, signal_period: usize) -> Self {
        Self::with_line(fast, slow, signal_period, MacdLine::Signal, "macd_signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal_period: usize) -> Self {
        Self::with_line(fast, slow, signal_period, MacdLine::Histogram, "macd_hist")
    }

    fn with_line(
        fast: usize,
        slow: usize,
        signal_period: usize,
        line: MacdLine,
        name: &str,
    ) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal_period >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        Self {
            fast,
            slow,
            signal_period,
            line,
            name: name.to_string(),
        }
    }

    fn macd_line_values(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes = from_values(&bars.iter().map(|b| b.close).collect::<Vec<_>>());
        let fast = ema_of_options(&closes, self.fast);
        let slow = ema_of_options(&closes, self.slow);
        sub(&fast, &slow)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        match self.line {
            MacdLine::Macd => self.slow.saturating_sub(1),
            MacdLine::Signal | MacdLine::Histogram => {
                self.slow.saturating_sub(1) + self.signal_period.saturating_sub(1)
            }
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let macd = self.macd_line_values(bars);
        match self.line {
            MacdLine::Macd => macd,
            MacdLine::Signal => ema_of_options(&macd, self.signal_period),
            MacdLine::Histogram => {
                let signal = ema_of_options(&macd, self.signal_period);
                sub(&macd, &signal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn rising_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_line_defined_after_slow_warmup() {
        let bars = make_bars(&rising_closes(30));
        let macd = Macd::line(3, 6, 2).compute(&bars);
        for entry in macd.iter().take(5) {
            assert!(entry.is_none());
        }
        assert!(macd[5].is_some());
    }

    #[test]
    fn signal_line_lags_macd_line() {
        let bars = make_bars(&rising_closes(30));
        let macd = Macd::line(3, 6, 2).compute(&bars);
        let signal = Macd::signal(3, 6, 2).compute(&bars);
        assert!(macd[5].is_some());
        assert!(signal[5].is_none());
        assert!(signal[6].is_some());
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let bars = make_bars(&rising_closes(30));
        let macd = Macd::line(3, 6, 2).compute(&bars);
        let signal = Macd::signal(3, 6, 2).compute(&bars);
        let hist = Macd::histogram(3, 6, 2).compute(&bars);
        for i in 0..30 {
            match (macd[i], signal[i], hist[i]) {
                (Some(m), Some(s), Some(h)) => assert_approx(h, m - s, DEFAULT_EPSILON),
                (_, _, h) => assert!(h.is_none()),
            }
        }
    }

    #[test]
    fn steady_uptrend_has_positive_macd() {
        let bars = make_bars(&rising_closes(40));
        let macd = Macd::line(12, 26, 9).compute(&bars);
        // Fast EMA sits above slow EMA in a constant uptrend
        assert!(macd[30].unwrap() > 0.0);
    }

    #[test]
    fn macd_too_few_bars_is_all_undefined() {
        let bars = make_bars(&rising_closes(10));
        let macd = Macd::line(12, 26, 9).compute(&bars);
        assert_eq!(macd.len(), 10);
        assert!(macd.iter().all(|v| v.is_none()));
    }

    #[test]
    fn macd_warmups() {
        assert_eq!(Macd::line(12, 26, 9).warmup(), 25);
        assert_eq!(Macd::signal(12, 26, 9).warmup(), 33);
        assert_eq!(Macd::histogram(12, 26, 9).warmup(), 33);
    }
}
