//! Observation series supplied to the forecast engine.

use crate::error::{Error, Result};

/// An ordered, equally spaced sequence of scalar observations.
///
/// A series is constructed once per forecast request and never mutated.
/// Construction rejects empty input and non-finite entries, so every value
/// downstream code sees is a usable number.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    name: Option<String>,
}

impl Series {
    /// Create a new series from a vector of observations.
    pub fn new(values: Vec<f64>, name: Option<String>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidRequest(
                "series must contain at least one observation".to_string(),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidRequest(format!(
                "series contains a non-numeric entry at position {}",
                pos
            )));
        }
        Ok(Series { values, name })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations. Construction guarantees at
    /// least one, so this is false for any constructed series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Optional name of the series.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Value at a position.
    pub fn get(&self, pos: usize) -> Option<f64> {
        self.values.get(pos).copied()
    }

    /// All observations in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The most recent observation.
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// The trailing `n` observations, or the whole series when it is shorter.
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }
}
