//! Training dataset — a dense feature matrix with binary labels.

use rand::rngs::StdRng;
use rand::Rng;

/// Feature rows plus 0/1 labels, fully materialized (rows with undefined
/// features are dropped before construction).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

impl Dataset {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            rows: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<f64>, label: f64) {
        debug_assert_eq!(row.len(), self.feature_names.len());
        self.rows.push(row);
        self.labels.push(label);
    }

    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Fraction of positive labels.
    pub fn positive_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.labels.iter().sum::<f64>() / self.labels.len() as f64
    }

    /// Sample row indices with replacement (one bootstrap draw per sample).
    pub fn bootstrap_indices(&self, rng: &mut StdRng) -> Vec<usize> {
        let n = self.n_samples();
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}
