//! Decision tree regression.
//!
//! CART-style regression tree with mean-squared-error splitting. Serves as
//! the base learner of the random forest ensemble; fully deterministic for
//! a fixed input.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ml::models::Regressor;

/// Configuration for a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeConfig {
    /// Maximum depth of the tree (None = no limit)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required at a leaf node
    pub min_samples_leaf: usize,
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        DecisionTreeConfig {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// A node in the fitted tree, stored in a flat arena indexed by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode {
    /// Feature index used for splitting (None for leaves)
    feature_index: Option<usize>,
    /// Threshold for the split
    threshold: Option<f64>,
    /// Prediction value (mean of targets at this node)
    prediction: f64,
    /// Left child node index
    left_child: Option<usize>,
    /// Right child node index
    right_child: Option<usize>,
    /// Number of samples at this node
    n_samples: usize,
    /// Impurity at this node
    impurity: f64,
    /// Depth of this node
    depth: usize,
    /// Whether this is a leaf node
    is_leaf: bool,
}

impl TreeNode {
    fn new_leaf(prediction: f64, n_samples: usize, impurity: f64, depth: usize) -> Self {
        TreeNode {
            feature_index: None,
            threshold: None,
            prediction,
            left_child: None,
            right_child: None,
            n_samples,
            impurity,
            depth,
            is_leaf: true,
        }
    }

    fn new_split(
        feature_index: usize,
        threshold: f64,
        prediction: f64,
        n_samples: usize,
        impurity: f64,
        depth: usize,
    ) -> Self {
        TreeNode {
            feature_index: Some(feature_index),
            threshold: Some(threshold),
            prediction,
            left_child: None,
            right_child: None,
            n_samples,
            impurity,
            depth,
            is_leaf: false,
        }
    }
}

/// Decision Tree Regressor over plain numeric matrices.
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    config: DecisionTreeConfig,
    nodes: Vec<TreeNode>,
    n_features: usize,
    is_fitted: bool,
}

impl DecisionTreeRegressor {
    /// Create a new decision tree regressor
    pub fn new(config: DecisionTreeConfig) -> Self {
        DecisionTreeRegressor {
            config,
            nodes: Vec::new(),
            n_features: 0,
            is_fitted: false,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(DecisionTreeConfig::default())
    }

    /// Get the tree depth
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Get the number of leaves
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf).count()
    }

    /// Mean squared error of a set of target values around their mean
    fn calculate_mse(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    /// Find the best split for a node
    fn find_best_split(
        &self,
        x: &[Vec<f64>],
        y: &[f64],
        indices: &[usize],
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        if indices.len() < self.config.min_samples_split {
            return None;
        }

        let values: Vec<f64> = indices.iter().map(|&i| y[i]).collect();
        let current_impurity = Self::calculate_mse(&values);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for feature_idx in 0..self.n_features {
            let mut feature_values: Vec<f64> = indices
                .iter()
                .map(|&idx| x[idx][feature_idx])
                .filter(|v| v.is_finite())
                .collect();
            feature_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            feature_values.dedup();

            // Candidate thresholds are midpoints of adjacent distinct values
            for i in 0..feature_values.len().saturating_sub(1) {
                let threshold = (feature_values[i] + feature_values[i + 1]) / 2.0;

                let mut left_indices = Vec::new();
                let mut right_indices = Vec::new();
                let mut left_values = Vec::new();
                let mut right_values = Vec::new();

                for &idx in indices {
                    if x[idx][feature_idx] <= threshold {
                        left_indices.push(idx);
                        left_values.push(y[idx]);
                    } else {
                        right_indices.push(idx);
                        right_values.push(y[idx]);
                    }
                }

                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    continue;
                }

                let left_impurity = Self::calculate_mse(&left_values);
                let right_impurity = Self::calculate_mse(&right_values);

                let n = indices.len() as f64;
                let weighted_impurity = (left_indices.len() as f64 * left_impurity
                    + right_indices.len() as f64 * right_impurity)
                    / n;

                let gain = current_impurity - weighted_impurity;

                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_indices, right_indices));
                }
            }
        }

        best_split
    }

    /// Build the tree recursively, returning the index of the created node
    fn build_tree(&mut self, x: &[Vec<f64>], y: &[f64], indices: Vec<usize>, depth: usize) -> usize {
        let values: Vec<f64> = indices.iter().map(|&i| y[i]).collect();
        let prediction = values.iter().sum::<f64>() / values.len() as f64;
        let impurity = Self::calculate_mse(&values);
        let total = indices.len();

        let should_stop = self.config.max_depth.map(|d| depth >= d).unwrap_or(false)
            || total < self.config.min_samples_split
            || impurity < 1e-10;

        if should_stop {
            let node_idx = self.nodes.len();
            self.nodes
                .push(TreeNode::new_leaf(prediction, total, impurity, depth));
            return node_idx;
        }

        if let Some((feature_idx, threshold, left_indices, right_indices)) =
            self.find_best_split(x, y, &indices)
        {
            let node_idx = self.nodes.len();
            self.nodes.push(TreeNode::new_split(
                feature_idx,
                threshold,
                prediction,
                total,
                impurity,
                depth,
            ));

            let left_child_idx = self.build_tree(x, y, left_indices, depth + 1);
            let right_child_idx = self.build_tree(x, y, right_indices, depth + 1);

            self.nodes[node_idx].left_child = Some(left_child_idx);
            self.nodes[node_idx].right_child = Some(right_child_idx);

            node_idx
        } else {
            // No valid split found, create leaf
            let node_idx = self.nodes.len();
            self.nodes
                .push(TreeNode::new_leaf(prediction, total, impurity, depth));
            node_idx
        }
    }

    /// Walk the tree for a single row
    fn predict_single(&self, row: &[f64]) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }

        let mut node_idx = 0;
        loop {
            let node = &self.nodes[node_idx];

            if node.is_leaf {
                return node.prediction;
            }

            let feature_idx = node.feature_index.unwrap_or(0);
            let threshold = node.threshold.unwrap_or(0.0);

            if row[feature_idx] <= threshold {
                node_idx = node.left_child.unwrap_or(0);
            } else {
                node_idx = node.right_child.unwrap_or(0);
            }
        }
    }
}

impl Regressor for DecisionTreeRegressor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EngineFailure(
                "cannot fit a tree on an empty feature matrix".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(Error::EngineFailure(format!(
                "feature matrix has {} rows but target vector has {}",
                x.len(),
                y.len()
            )));
        }

        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(Error::EngineFailure(
                "feature matrix rows must share one non-zero width".to_string(),
            ));
        }

        self.n_features = n_features;
        self.nodes.clear();
        let indices: Vec<usize> = (0..x.len()).collect();
        self.build_tree(x, y, indices, 0);
        self.is_fitted = true;

        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if !self.is_fitted {
            return Err(Error::EngineFailure("model not fitted".to_string()));
        }
        if row.len() != self.n_features {
            return Err(Error::EngineFailure(format!(
                "expected a row of width {}, got {}",
                self.n_features,
                row.len()
            )));
        }
        Ok(self.predict_single(row))
    }
}
