//! CART decision tree — Gini-impurity splits for binary classification.
//!
//! Supports depth and leaf-size limits plus per-split feature subsampling
//! (the randomness that makes a forest of these trees worth averaging).

use super::dataset::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Limits controlling tree growth.
#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split; `None` means all.
    pub max_features: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Fraction of positive labels among the samples in this leaf.
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted classification tree. `predict_one` returns the positive-class
/// probability of the reached leaf.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        assert!(config.max_depth >= 1, "tree depth must be >= 1");
        assert!(config.min_samples_leaf >= 1, "min_samples_leaf must be >= 1");
        Self { config, root: None }
    }

    /// Fit on the rows selected by `indices` (bootstrap draw or all rows).
    pub fn fit(&mut self, dataset: &Dataset, indices: &[usize], rng: &mut StdRng) {
        if indices.is_empty() {
            self.root = Some(Node::Leaf { probability: 0.5 });
            return;
        }
        self.root = Some(self.grow(dataset, indices, 0, rng));
    }

    pub fn predict_one(&self, row: &[f64]) -> f64 {
        let mut node = match &self.root {
            Some(n) => n,
            None => return 0.5,
        };
        loop {
            match node {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn grow(&self, dataset: &Dataset, indices: &[usize], depth: usize, rng: &mut StdRng) -> Node {
        let probability = positive_rate(dataset, indices);
        let pure = probability == 0.0 || probability == 1.0;
        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || pure
        {
            return Node::Leaf { probability };
        }

        let candidates = self.candidate_features(dataset.n_features(), rng);
        let split = candidates
            .iter()
            .filter_map(|&f| self.best_threshold(dataset, indices, f))
            .min_by(|a, b| a.impurity.total_cmp(&b.impurity));

        let split = match split {
            Some(s) if s.impurity < gini(probability) => s,
            _ => return Node::Leaf { probability },
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| dataset.rows[i][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(dataset, &left_idx, depth + 1, rng)),
            right: Box::new(self.grow(dataset, &right_idx, depth + 1, rng)),
        }
    }

    fn candidate_features(&self, n_features: usize, rng: &mut StdRng) -> Vec<usize> {
        let mut all: Vec<usize> = (0..n_features).collect();
        match self.config.max_features {
            Some(k) if k < n_features => {
                all.shuffle(rng);
                all.truncate(k);
                all
            }
            _ => all,
        }
    }

    /// Best threshold for one feature: midpoints between consecutive sorted
    /// unique values, scored by weighted Gini of the two sides.
    fn best_threshold(&self, dataset: &Dataset, indices: &[usize], feature: usize) -> Option<Split> {
        let mut pairs: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (dataset.rows[i][feature], dataset.labels[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = pairs.len();
        let total_pos: f64 = pairs.iter().map(|p| p.1).sum();

        let mut best: Option<Split> = None;
        let mut left_pos = 0.0;
        for i in 0..n - 1 {
            left_pos += pairs[i].1;
            // No threshold between equal values
            if pairs[i].0 == pairs[i + 1].0 {
                continue;
            }
            let left_n = i + 1;
            let right_n = n - left_n;
            if left_n < self.config.min_samples_leaf || right_n < self.config.min_samples_leaf {
                continue;
            }
            let left_gini = gini(left_pos / left_n as f64);
            let right_gini = gini((total_pos - left_pos) / right_n as f64);
            let impurity =
                (left_n as f64 * left_gini + right_n as f64 * right_gini) / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(Split {
                    feature,
                    threshold: (pairs[i].0 + pairs[i + 1].0) / 2.0,
                    impurity,
                });
            }
        }
        best
    }
}

struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(p: f64) -> f64 {
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn positive_rate(dataset: &Dataset, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.5;
    }
    indices.iter().map(|&i| dataset.labels[i]).sum::<f64>() / indices.len() as f64
}
