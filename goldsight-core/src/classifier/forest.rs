//! Random forest — bagged CART trees with vote-fraction probabilities.
//!
//! Single-threaded by contract: trees are grown sequentially with per-tree
//! seeds derived from one master seed, so a given (data, config) pair always
//! produces the same forest.

use super::dataset::Dataset;
use super::tree::{DecisionTree, TreeConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Forest hyperparameters. The defaults mirror the production direction
/// model this pipeline ships with.
#[derive(Debug, Clone, Copy)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 300,
            max_depth: 7,
            min_samples_split: 2,
            min_samples_leaf: 5,
            seed: 42,
        }
    }
}

/// A fitted forest.
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        assert!(config.n_trees >= 1, "forest needs at least one tree");
        Self {
            config,
            trees: Vec::new(),
        }
    }

    /// Grow the forest: one bootstrap draw and one derived seed per tree,
    /// sqrt-of-features subsampling per split.
    pub fn fit(&mut self, dataset: &Dataset) {
        let max_features = (dataset.n_features() as f64).sqrt().ceil() as usize;
        let tree_config = TreeConfig {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: Some(max_features.max(1)),
        };

        self.trees = (0..self.config.n_trees)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(i as u64));
                let indices = dataset.bootstrap_indices(&mut rng);
                let mut tree = DecisionTree::new(tree_config);
                tree.fit(dataset, &indices, &mut rng);
                tree
            })
            .collect();
    }

    /// Up-move probability for one feature row: the fraction of trees whose
    /// reached leaf votes positive. An unfitted forest reads 0.5.
    pub fn predict_probability(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }
        let votes = self
            .trees
            .iter()
            .filter(|t| t.predict_one(row) > 0.5)
            .count();
        votes as f64 / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
