//! Confirmation scoring — weighted rule voting over the latest bar.
//!
//! The scorer aggregates independent `ConfirmationCheck` predicates by
//! summing their contributed weights and normalizing to [0, 100]. Checks can
//! be added or removed under test without touching the aggregation.

pub mod checks;

use crate::domain::Bar;
use crate::indicators::IndicatorSet;
use checks::{
    CheckContext, ClosePosition, ConfirmationCheck, Momentum, RangeConfirmation, RsiExtremity,
    TrendAlignment, VolatilityExpansion,
};

/// Round to 2 decimal places, the precision of every exposed confidence.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted-vote confirmation scorer.
///
/// The score is `sum(triggered weights) / total_weight * 100`, rounded to
/// two decimals. The default checklist carries a total weight of 6. A window
/// of fewer than two bars cannot be scored and reads 0.
pub struct ConfirmationScorer {
    checks: Vec<Box<dyn ConfirmationCheck>>,
    total_weight: f64,
}

impl Default for ConfirmationScorer {
    fn default() -> Self {
        Self::new(vec![
            Box::new(RsiExtremity),
            Box::new(TrendAlignment),
            Box::new(Momentum),
            Box::new(VolatilityExpansion),
            Box::new(RangeConfirmation),
            Box::new(ClosePosition),
        ])
    }
}

impl ConfirmationScorer {
    pub fn new(checks: Vec<Box<dyn ConfirmationCheck>>) -> Self {
        let total_weight = checks.iter().map(|c| c.weight()).sum();
        Self {
            checks,
            total_weight,
        }
    }

    /// Score the latest bar of `bars`, computing the standard indicator set
    /// on the way. Recomputed from scratch on every call — no cross-call
    /// state.
    pub fn score(&self, bars: &[Bar]) -> f64 {
        if bars.len() < 2 {
            return 0.0;
        }
        let indicators = IndicatorSet::standard(bars);
        self.score_at(bars, &indicators, bars.len() - 1)
    }

    /// Score bar `index` against precomputed indicator columns. Used by the
    /// backtest loop, which computes the columns once over the full series
    /// (every transform is causal, so per-index values equal prefix
    /// recomputation).
    pub fn score_at(&self, bars: &[Bar], indicators: &IndicatorSet, index: usize) -> f64 {
        if bars.len() < 2 || index >= bars.len() {
            return 0.0;
        }
        let ctx = CheckContext {
            bars,
            indicators,
            index,
        };
        let sum: f64 = self.checks.iter().map(|c| c.evaluate(&ctx)).sum();
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        round2(sum / self.total_weight * 100.0)
    }
}
