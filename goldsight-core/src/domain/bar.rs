//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument at a single timestamp.
///
/// Spot metals and FX feeds often carry no volume; a structurally absent
/// volume is represented as 0.0 rather than an optional field, matching the
/// upstream feed convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Basic OHLCV sanity check: high >= open/close >= low, positive prices,
    /// non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low > 0.0
            && self.volume >= 0.0
    }

    /// Typical price (H + L + C) / 3, the VWAP numerator basis.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Bar range, high - low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Position of the close within [low, high]: 0 = at the low, 1 = at the
    /// high. A zero-range bar reads as 0.5 (neither extreme).
    pub fn close_position(&self) -> f64 {
        let range = self.range();
        if range <= 0.0 {
            0.5
        } else {
            (self.close - self.low) / range
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_bar() -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            open: 2030.0,
            high: 2042.0,
            low: 2025.0,
            close: 2040.0,
            volume: 0.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 2020.0; // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn typical_price_is_hlc3() {
        let bar = sample_bar();
        let expected = (2042.0 + 2025.0 + 2040.0) / 3.0;
        assert!((bar.typical_price() - expected).abs() < 1e-12);
    }

    #[test]
    fn close_position_near_high() {
        let bar = sample_bar();
        // (2040 - 2025) / (2042 - 2025) = 15/17
        assert!((bar.close_position() - 15.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn close_position_zero_range_is_half() {
        let mut bar = sample_bar();
        bar.high = 2030.0;
        bar.low = 2030.0;
        bar.open = 2030.0;
        bar.close = 2030.0;
        assert_eq!(bar.close_position(), 0.5);
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
