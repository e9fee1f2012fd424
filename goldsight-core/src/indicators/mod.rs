//! Indicator engine — causal numeric transforms over a bar series.
//!
//! All transforms implement the `Indicator` trait: bar history in, an
//! optional series of equal length out. A value at index i depends only on
//! indices <= i (no look-ahead), warm-up entries are `None`, and a series
//! shorter than the minimum period yields an all-`None` column instead of an
//! error.
//!
//! Multi-series indicators (MACD, Bollinger, Stochastic RSI) are exposed as
//! separate named instances per line, keeping the single-series trait
//! unchanged.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;
pub mod vwap;

pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stoch_rsi::{StochRsi, StochRsiLine};
pub use vwap::Vwap;

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// `compute` returns one value per input bar; the first `warmup()` entries
/// are `None`. Downstream consumers must treat `None` as "no reading", never
/// as zero.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "sma_14", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading bars with no defined output.
    fn warmup(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}

/// Named indicator columns, each aligned with the bar series they were
/// computed from. Built once, then queried by bar index — derived columns
/// are only ever appended, price fields are never rewritten.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    columns: HashMap<String, Vec<Option<f64>>>,
}

/// Default lookback for the single-period indicators (SMA/EMA/RSI/ATR).
pub const DEFAULT_PERIOD: usize = 14;

/// Rolling window shared by VWAP and the scorer's volatility baselines.
pub const BASELINE_WINDOW: usize = 20;

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the standard column set used by the scorer and classifier.
    pub fn standard(bars: &[Bar]) -> Self {
        let mut set = Self::new();
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(DEFAULT_PERIOD)),
            Box::new(Ema::new(DEFAULT_PERIOD)),
            Box::new(Rsi::new(DEFAULT_PERIOD)),
            Box::new(Atr::new(DEFAULT_PERIOD)),
            Box::new(Macd::line(12, 26, 9)),
            Box::new(Macd::signal(12, 26, 9)),
            Box::new(Macd::histogram(12, 26, 9)),
            Box::new(Bollinger::upper(BASELINE_WINDOW, 2.0)),
            Box::new(Bollinger::middle(BASELINE_WINDOW, 2.0)),
            Box::new(Bollinger::lower(BASELINE_WINDOW, 2.0)),
            Box::new(StochRsi::k(DEFAULT_PERIOD, 3, 3)),
            Box::new(StochRsi::d(DEFAULT_PERIOD, 3, 3)),
            Box::new(Vwap::new(BASELINE_WINDOW)),
        ];
        for ind in indicators {
            let column = ind.compute(bars);
            set.insert(ind.name().to_string(), column);
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>, column: Vec<Option<f64>>) {
        self.columns.insert(name.into(), column);
    }

    /// Value of a named column at a bar index; `None` for a missing column,
    /// an out-of-range index, or a warm-up entry.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.columns
            .get(name)
            .and_then(|c| c.get(bar_index).copied())
            .flatten()
    }

    pub fn get_column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLCV: open = prev close (or close for the first
/// bar), high = max(open, close) + 1.0, low = min(open, close) - 1.0,
/// volume = 1000, hourly timestamps.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars with explicit OHLC tuples (volume = 1000, hourly timestamps).
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base + Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
