//! Random forest regression.
//!
//! Bagging over decision trees: each tree fits a bootstrap resample of the
//! training data and predictions are averaged. Every random draw flows from
//! the configured seed, so a fitted forest is reproducible bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ml::models::tree::{DecisionTreeConfig, DecisionTreeRegressor};
use crate::ml::models::Regressor;

/// Configuration for a random forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestConfig {
    /// Number of trees in the forest
    pub n_estimators: usize,
    /// Maximum depth of each tree (None = no limit)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required at a leaf node
    pub min_samples_leaf: usize,
    /// Whether to bootstrap samples
    pub bootstrap: bool,
    /// Maximum number of samples to draw for each tree (None = n_samples)
    pub max_samples: Option<usize>,
    /// Seed for the bootstrap draws
    pub random_seed: u64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        RandomForestConfig {
            n_estimators: 200,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: true,
            max_samples: None,
            random_seed: 42,
        }
    }
}

/// Builder for RandomForestConfig
pub struct RandomForestConfigBuilder {
    config: RandomForestConfig,
}

impl RandomForestConfigBuilder {
    pub fn new() -> Self {
        RandomForestConfigBuilder {
            config: RandomForestConfig::default(),
        }
    }

    pub fn n_estimators(mut self, n: usize) -> Self {
        self.config.n_estimators = n;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    pub fn min_samples_split(mut self, samples: usize) -> Self {
        self.config.min_samples_split = samples;
        self
    }

    pub fn min_samples_leaf(mut self, samples: usize) -> Self {
        self.config.min_samples_leaf = samples;
        self
    }

    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.config.bootstrap = bootstrap;
        self
    }

    pub fn max_samples(mut self, samples: usize) -> Self {
        self.config.max_samples = Some(samples);
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    pub fn build(self) -> RandomForestConfig {
        self.config
    }
}

impl Default for RandomForestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Random Forest Regressor over plain numeric matrices.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    config: RandomForestConfig,
    trees: Vec<DecisionTreeRegressor>,
    is_fitted: bool,
}

impl RandomForestRegressor {
    /// Create a new random forest regressor
    pub fn new(config: RandomForestConfig) -> Self {
        RandomForestRegressor {
            config,
            trees: Vec::new(),
            is_fitted: false,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(RandomForestConfig::default())
    }

    /// Get the number of fitted trees
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Bootstrap sample indices for one tree. Each tree draws from its own
    /// generator seeded as `random_seed + tree_idx`, so refitting with the
    /// same data and seed rebuilds the identical forest.
    fn bootstrap_indices(&self, n_samples: usize, tree_idx: usize) -> Vec<usize> {
        let seed = self.config.random_seed.wrapping_add(tree_idx as u64);
        let mut rng = StdRng::seed_from_u64(seed);
        let draw = self.config.max_samples.unwrap_or(n_samples);

        (0..draw).map(|_| rng.random_range(0..n_samples)).collect()
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EngineFailure(
                "cannot fit a forest on an empty feature matrix".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(Error::EngineFailure(format!(
                "feature matrix has {} rows but target vector has {}",
                x.len(),
                y.len()
            )));
        }
        if self.config.n_estimators == 0 {
            return Err(Error::EngineFailure(
                "forest needs at least one estimator".to_string(),
            ));
        }

        let n_samples = x.len();
        let tree_config = DecisionTreeConfig {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
        };

        self.trees.clear();
        for tree_idx in 0..self.config.n_estimators {
            let indices = if self.config.bootstrap {
                self.bootstrap_indices(n_samples, tree_idx)
            } else {
                (0..n_samples).collect()
            };

            let sample_x: Vec<Vec<f64>> = indices.iter().map(|&i| x[i].clone()).collect();
            let sample_y: Vec<f64> = indices.iter().map(|&i| y[i]).collect();

            let mut tree = DecisionTreeRegressor::new(tree_config.clone());
            tree.fit(&sample_x, &sample_y)?;
            self.trees.push(tree);
        }

        self.is_fitted = true;
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if !self.is_fitted {
            return Err(Error::EngineFailure("model not fitted".to_string()));
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_row(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_linear_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        // Deterministic wobble around y = 2x.
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20)
            .map(|i| 2.0 * i as f64 + ((i * 7) % 3) as f64 * 0.1)
            .collect();
        (x, y)
    }

    #[test]
    fn test_fit_and_predict() {
        let (x, y) = noisy_linear_data();
        let config = RandomForestConfigBuilder::new()
            .n_estimators(25)
            .random_seed(42)
            .build();
        let mut forest = RandomForestRegressor::new(config);
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.n_estimators(), 25);

        // Interior points should land near the underlying line.
        let pred = forest.predict_row(&[10.0]).unwrap();
        assert!((pred - 20.0).abs() < 3.0, "prediction {} too far off", pred);
    }

    #[test]
    fn test_deterministic_refit() {
        let (x, y) = noisy_linear_data();
        let config = RandomForestConfigBuilder::new()
            .n_estimators(10)
            .random_seed(7)
            .build();

        let mut a = RandomForestRegressor::new(config.clone());
        a.fit(&x, &y).unwrap();
        let mut b = RandomForestRegressor::new(config);
        b.fit(&x, &y).unwrap();

        for probe in [0.0, 4.5, 11.0, 19.0] {
            assert_eq!(
                a.predict_row(&[probe]).unwrap(),
                b.predict_row(&[probe]).unwrap()
            );
        }
    }

    #[test]
    fn test_seed_changes_forest() {
        let (x, y) = noisy_linear_data();
        let mut a = RandomForestRegressor::new(
            RandomForestConfigBuilder::new()
                .n_estimators(10)
                .random_seed(1)
                .build(),
        );
        let mut b = RandomForestRegressor::new(
            RandomForestConfigBuilder::new()
                .n_estimators(10)
                .random_seed(2)
                .build(),
        );
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        // Different bootstrap draws should disagree somewhere.
        let differs = (0..20).any(|i| {
            a.predict_row(&[i as f64]).unwrap() != b.predict_row(&[i as f64]).unwrap()
        });
        assert!(differs);
    }

    #[test]
    fn test_unfitted_predict_fails() {
        let forest = RandomForestRegressor::default_config();
        assert!(forest.predict_row(&[1.0]).is_err());
    }
}
