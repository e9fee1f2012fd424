//! Direction classifier adapter.
//!
//! Trains a seeded random forest to predict whether the next bar closes
//! higher, over a statically declared optional-feature set. The contract
//! consumed upstream is small: the trained model exposes the resolved
//! feature names and `predict_probability(row) -> [0, 1]`. Mapping that
//! probability to a `Bias` happens at the caller boundary
//! (`Bias::from_probability`), not here.

pub mod dataset;
pub mod forest;
pub mod tree;

pub use dataset::Dataset;
pub use forest::{ForestConfig, RandomForest};
pub use tree::{DecisionTree, TreeConfig};

use crate::domain::Bar;
use crate::indicators::IndicatorSet;
use thiserror::Error;

/// Minimum usable rows after label construction and undefined-row dropping.
pub const MIN_TRAINING_ROWS: usize = 30;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("not enough training rows: {rows} usable, {required} required")]
    NotEnoughRows { rows: usize, required: usize },

    #[error("no features available over the training window")]
    NoFeatures,
}

/// Where a feature's per-bar value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSource {
    Open,
    High,
    Low,
    Close,
    Volume,
    Indicator(&'static str),
}

/// One declared feature: a name plus its source. Availability is resolved
/// once per training call, never probed ad hoc mid-training.
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub source: FeatureSource,
}

impl FeatureSpec {
    fn value(&self, bars: &[Bar], indicators: &IndicatorSet, index: usize) -> Option<f64> {
        let bar = bars.get(index)?;
        match &self.source {
            FeatureSource::Open => Some(bar.open),
            FeatureSource::High => Some(bar.high),
            FeatureSource::Low => Some(bar.low),
            FeatureSource::Close => Some(bar.close),
            FeatureSource::Volume => {
                // Structurally absent volume (all-zero feed) is unavailable,
                // not a column of zeros.
                Some(bar.volume)
            }
            FeatureSource::Indicator(name) => indicators.get(name, index),
        }
    }

    /// Availability predicate, evaluated once per training call: the source
    /// must yield at least one defined (and for volume, non-zero) value.
    fn available(&self, bars: &[Bar], indicators: &IndicatorSet) -> bool {
        match &self.source {
            FeatureSource::Volume => bars.iter().any(|b| b.volume > 0.0),
            FeatureSource::Indicator(name) => indicators
                .get_column(name)
                .is_some_and(|col| col.iter().any(|v| v.is_some())),
            _ => !bars.is_empty(),
        }
    }
}

/// The standard declared feature set: raw OHLC always, volume and indicator
/// columns when the window actually carries them.
pub fn default_feature_set() -> Vec<FeatureSpec> {
    vec![
        FeatureSpec { name: "open", source: FeatureSource::Open },
        FeatureSpec { name: "high", source: FeatureSource::High },
        FeatureSpec { name: "low", source: FeatureSource::Low },
        FeatureSpec { name: "close", source: FeatureSource::Close },
        FeatureSpec { name: "volume", source: FeatureSource::Volume },
        FeatureSpec { name: "rsi_14", source: FeatureSource::Indicator("rsi_14") },
        FeatureSpec { name: "ema_14", source: FeatureSource::Indicator("ema_14") },
        FeatureSpec { name: "sma_14", source: FeatureSource::Indicator("sma_14") },
        FeatureSpec { name: "atr_14", source: FeatureSource::Indicator("atr_14") },
    ]
}

/// A fitted direction model plus the features it was trained on.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForest,
    features: Vec<FeatureSpec>,
}

impl TrainedModel {
    /// Resolved feature names, in row order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name).collect()
    }

    /// Up-move probability for an explicit feature row (must match
    /// `feature_names()` in length and order).
    pub fn predict_probability(&self, row: &[f64]) -> f64 {
        self.forest.predict_probability(row)
    }

    /// Extract the latest bar's feature row; `None` when any selected
    /// feature is undefined there.
    pub fn latest_feature_row(&self, bars: &[Bar], indicators: &IndicatorSet) -> Option<Vec<f64>> {
        if bars.is_empty() {
            return None;
        }
        let index = bars.len() - 1;
        self.features
            .iter()
            .map(|f| f.value(bars, indicators, index))
            .collect()
    }
}

/// Train a direction model over a bar window and its indicator columns.
///
/// Row i is labeled by whether bar i+1 closes above bar i (the last bar has
/// no label and is dropped); rows with any undefined selected feature are
/// dropped too.
pub fn train(
    bars: &[Bar],
    indicators: &IndicatorSet,
    config: ForestConfig,
) -> Result<TrainedModel, TrainError> {
    let features: Vec<FeatureSpec> = default_feature_set()
        .into_iter()
        .filter(|f| f.available(bars, indicators))
        .collect();
    if features.is_empty() {
        return Err(TrainError::NoFeatures);
    }

    let mut dataset = Dataset::new(features.iter().map(|f| f.name.to_string()).collect());
    for i in 0..bars.len().saturating_sub(1) {
        let row: Option<Vec<f64>> = features
            .iter()
            .map(|f| f.value(bars, indicators, i))
            .collect();
        if let Some(row) = row {
            let label = if bars[i + 1].close > bars[i].close { 1.0 } else { 0.0 };
            dataset.push(row, label);
        }
    }

    if dataset.n_samples() < MIN_TRAINING_ROWS {
        return Err(TrainError::NotEnoughRows {
            rows: dataset.n_samples(),
            required: MIN_TRAINING_ROWS,
        });
    }

    let mut forest = RandomForest::new(config);
    forest.fit(&dataset);
    Ok(TrainedModel { forest, features })
}
