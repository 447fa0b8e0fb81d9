//! Sliding-window training-pair construction.

use crate::error::{Error, Result};

/// Supervised training pairs built from a flat numeric history.
///
/// For a history of length `L` and window size `W` there are exactly
/// `L - W` pairs, in chronological order: pair `i` maps the window starting
/// at position `i` to the observation at position `i + W`.
#[derive(Debug, Clone)]
pub struct WindowedDataset {
    inputs: Vec<Vec<f64>>,
    targets: Vec<f64>,
    window: usize,
}

impl WindowedDataset {
    /// Build the complete training-pair set for a history.
    ///
    /// This is a pure transform: it does not validate the values themselves,
    /// callers supply finite numbers. Fails with
    /// [`Error::InsufficientData`] when the history is no longer than the
    /// window, since no pair can be formed.
    pub fn from_values(values: &[f64], window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidRequest(
                "window must be at least 1".to_string(),
            ));
        }
        if values.len() <= window {
            return Err(Error::InsufficientData {
                length: values.len(),
                window,
            });
        }

        let n_pairs = values.len() - window;
        let mut inputs = Vec::with_capacity(n_pairs);
        let mut targets = Vec::with_capacity(n_pairs);
        for start in 0..n_pairs {
            inputs.push(values[start..start + window].to_vec());
            targets.push(values[start + window]);
        }

        Ok(WindowedDataset {
            inputs,
            targets,
            window,
        })
    }

    /// Number of training pairs.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the dataset holds no pairs. Construction guarantees at least
    /// one, so this is false for any constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The window size every input row has.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Input windows in chronological order.
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    /// Target values in chronological order.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Copy out the pairs at the given indices, preserving index order.
    /// Used to materialize the training and held-out subsets of a split.
    pub fn select(&self, indices: &[usize]) -> (Vec<Vec<f64>>, Vec<f64>) {
        let inputs = indices.iter().map(|&i| self.inputs[i].clone()).collect();
        let targets = indices.iter().map(|&i| self.targets[i]).collect();
        (inputs, targets)
    }
}
