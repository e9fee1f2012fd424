//! Directional bias — the market lean fed into the decision engine.

use super::Bar;
use serde::{Deserialize, Serialize};

/// Directional lean over recent price action.
///
/// Produced either by the recent-returns heuristic below or by mapping a
/// classifier probability at the caller boundary; the decision engine only
/// consumes the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// Map an up-move probability into a bias. The dead zone between the
    /// thresholds reads as Neutral.
    pub fn from_probability(prob: f64) -> Self {
        if prob > 0.6 {
            Bias::Bullish
        } else if prob < 0.4 {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }

    /// Heuristic bias from the sign of the mean close-to-close return over
    /// the trailing `lookback` bars. Fewer than two bars is Neutral.
    pub fn from_recent_returns(bars: &[Bar], lookback: usize) -> Self {
        if bars.len() < 2 {
            return Bias::Neutral;
        }
        let start = bars.len().saturating_sub(lookback.max(2));
        let window = &bars[start..];
        let mut sum = 0.0;
        let mut count = 0usize;
        for pair in window.windows(2) {
            if pair[0].close > 0.0 {
                sum += (pair[1].close - pair[0].close) / pair[0].close;
                count += 1;
            }
        }
        if count == 0 {
            return Bias::Neutral;
        }
        let mean = sum / count as f64;
        if mean > 0.0 {
            Bias::Bullish
        } else if mean < 0.0 {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: base + Duration::hours(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 0.0,
            })
            .collect()
    }

    #[test]
    fn probability_thresholds() {
        assert_eq!(Bias::from_probability(0.75), Bias::Bullish);
        assert_eq!(Bias::from_probability(0.25), Bias::Bearish);
        assert_eq!(Bias::from_probability(0.5), Bias::Neutral);
        // Boundary values fall in the dead zone
        assert_eq!(Bias::from_probability(0.6), Bias::Neutral);
        assert_eq!(Bias::from_probability(0.4), Bias::Neutral);
    }

    #[test]
    fn rising_closes_read_bullish() {
        let bars = bars_from_closes(&[2000.0, 2002.0, 2004.0, 2006.0]);
        assert_eq!(Bias::from_recent_returns(&bars, 10), Bias::Bullish);
    }

    #[test]
    fn falling_closes_read_bearish() {
        let bars = bars_from_closes(&[2006.0, 2004.0, 2002.0, 2000.0]);
        assert_eq!(Bias::from_recent_returns(&bars, 10), Bias::Bearish);
    }

    #[test]
    fn single_bar_is_neutral() {
        let bars = bars_from_closes(&[2000.0]);
        assert_eq!(Bias::from_recent_returns(&bars, 10), Bias::Neutral);
    }
}
