//! Confirmation checks — independent weighted predicates over the latest bar.
//!
//! Each check is a total function: undefined indicator readings, short
//! histories, and degenerate ranges all read as "not triggered" and
//! contribute zero weight. No single check can abort scoring.

use crate::domain::Bar;
use crate::indicators::{IndicatorSet, BASELINE_WINDOW, DEFAULT_PERIOD};

/// Evaluation context: the bar window, its precomputed indicator columns,
/// and the index of the bar being scored.
pub struct CheckContext<'a> {
    pub bars: &'a [Bar],
    pub indicators: &'a IndicatorSet,
    pub index: usize,
}

impl<'a> CheckContext<'a> {
    pub fn bar(&self) -> &Bar {
        &self.bars[self.index]
    }

    pub fn prev_bar(&self) -> Option<&Bar> {
        self.index.checked_sub(1).map(|i| &self.bars[i])
    }

    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name, self.index)
    }

    /// Mean of the trailing `window` values of a column ending at the
    /// current index. `None` unless every value in the span is defined.
    pub fn trailing_indicator_mean(&self, name: &str, window: usize) -> Option<f64> {
        let start = (self.index + 1).checked_sub(window)?;
        let mut sum = 0.0;
        for i in start..=self.index {
            sum += self.indicators.get(name, i)?;
        }
        Some(sum / window as f64)
    }

    /// Mean bar range (high - low) over the trailing `window` bars.
    pub fn trailing_range_mean(&self, window: usize) -> Option<f64> {
        let start = (self.index + 1).checked_sub(window)?;
        let sum: f64 = self.bars[start..=self.index].iter().map(Bar::range).sum();
        Some(sum / window as f64)
    }
}

/// A single weighted confirmation rule.
pub trait ConfirmationCheck: Send + Sync {
    fn name(&self) -> &str;

    fn weight(&self) -> f64;

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool;

    /// Contributed weight: full weight when triggered, zero otherwise.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> f64 {
        if self.triggered(ctx) {
            self.weight()
        } else {
            0.0
        }
    }
}

/// RSI in overbought (>70) or oversold (<30) territory.
pub struct RsiExtremity;

impl ConfirmationCheck for RsiExtremity {
    fn name(&self) -> &str {
        "rsi_extremity"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        match ctx.indicator(&format!("rsi_{DEFAULT_PERIOD}")) {
            Some(rsi) => rsi > 70.0 || rsi < 30.0,
            None => false,
        }
    }
}

/// Short-term momentum leads the baseline: EMA above SMA.
pub struct TrendAlignment;

impl ConfirmationCheck for TrendAlignment {
    fn name(&self) -> &str {
        "trend_alignment"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        match (
            ctx.indicator(&format!("ema_{DEFAULT_PERIOD}")),
            ctx.indicator(&format!("sma_{DEFAULT_PERIOD}")),
        ) {
            (Some(ema), Some(sma)) => ema > sma,
            _ => false,
        }
    }
}

/// Latest close above the previous close.
pub struct Momentum;

impl ConfirmationCheck for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn weight(&self) -> f64 {
        0.5
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        match ctx.prev_bar() {
            Some(prev) => ctx.bar().close > prev.close,
            None => false,
        }
    }
}

/// Latest ATR above its trailing 20-bar mean.
pub struct VolatilityExpansion;

impl ConfirmationCheck for VolatilityExpansion {
    fn name(&self) -> &str {
        "volatility_expansion"
    }

    fn weight(&self) -> f64 {
        0.5
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        let name = format!("atr_{DEFAULT_PERIOD}");
        match (
            ctx.indicator(&name),
            ctx.trailing_indicator_mean(&name, BASELINE_WINDOW),
        ) {
            (Some(atr), Some(baseline)) => atr > baseline,
            _ => false,
        }
    }
}

/// Latest bar range above 0.9x the trailing 20-bar mean range.
pub struct RangeConfirmation;

impl ConfirmationCheck for RangeConfirmation {
    fn name(&self) -> &str {
        "range_confirmation"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        match ctx.trailing_range_mean(BASELINE_WINDOW) {
            Some(baseline) => ctx.bar().range() > 0.9 * baseline,
            None => false,
        }
    }
}

/// Close near either extreme of the bar's range (position > 0.6 or < 0.4).
/// A zero-range bar reads position 0.5 and never triggers.
pub struct ClosePosition;

impl ConfirmationCheck for ClosePosition {
    fn name(&self) -> &str {
        "close_position"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn triggered(&self, ctx: &CheckContext<'_>) -> bool {
        let pos = ctx.bar().close_position();
        pos > 0.6 || pos < 0.4
    }
}
