//! Statistics helpers shared by the forecast engine.
//!
//! Everything here is deterministic: the train/held-out split draws from a
//! seeded generator so that identical requests partition identically.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divisor `n`, not `n - 1`).
///
/// Total over all inputs: an empty slice yields 0.0 rather than a division
/// by zero, and a single value yields 0.0.
pub fn population_std(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Partition the indices `0..n_rows` into (training, held-out) subsets of
/// fixed proportion.
///
/// The partition is a seeded shuffle, so it is reproducible but not
/// chronological. The held-out size is `ceil(n_rows * test_fraction)`,
/// clamped so both subsets stay non-empty.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(Error::EngineFailure(format!(
            "test fraction must lie in (0, 1), got {}",
            test_fraction
        )));
    }
    if n_rows < 2 {
        return Err(Error::EngineFailure(format!(
            "cannot split {} rows into training and held-out subsets",
            n_rows
        )));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64 * test_fraction).ceil() as usize).clamp(1, n_rows - 1);
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}
