//! Regression models.

pub mod ensemble;
pub mod tree;

pub use ensemble::{RandomForestConfig, RandomForestConfigBuilder, RandomForestRegressor};
pub use tree::{DecisionTreeConfig, DecisionTreeRegressor};

use crate::error::Result;

/// A regressor mapping a fixed-length numeric row to a scalar prediction.
pub trait Regressor {
    /// Fit the model to a feature matrix and target vector.
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict the target for a single row.
    fn predict_row(&self, row: &[f64]) -> Result<f64>;

    /// Predict the target for every row of a feature matrix.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }
}
