//! Residual-based uncertainty bands.

use serde::{Deserialize, Serialize};

/// Symmetric prediction interval around a point forecast.
///
/// A fixed two-field record: `lower[i]` and `upper[i]` bound the forecast
/// at step `i`, and both sequences always match the forecast's length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInterval {
    /// Lower bound per step
    pub lower: Vec<f64>,
    /// Upper bound per step
    pub upper: Vec<f64>,
}

impl ForecastInterval {
    /// Band of ±z·resid_std around each forecast step.
    ///
    /// The lower bound is clamped at zero. The target domain is an
    /// air-quality index, which cannot go negative; the clamp is a domain
    /// assumption, not a statistical one.
    pub fn from_point_forecast(forecast: &[f64], resid_std: f64, confidence_level: f64) -> Self {
        let margin = z_score(confidence_level) * resid_std;
        ForecastInterval {
            lower: forecast.iter().map(|v| (v - margin).max(0.0)).collect(),
            upper: forecast.iter().map(|v| v + margin).collect(),
        }
    }

    /// Zero-width band that repeats the forecast itself.
    ///
    /// Used on the persistence path, where no residual model exists: a
    /// collapsed band signals "no uncertainty model available", not "zero
    /// uncertainty".
    pub fn degenerate(forecast: &[f64]) -> Self {
        ForecastInterval {
            lower: forecast.to_vec(),
            upper: forecast.to_vec(),
        }
    }

    /// Number of steps the band covers.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether the band covers no steps.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}

/// Normal-approximation quantile for common confidence levels.
fn z_score(confidence_level: f64) -> f64 {
    match (confidence_level * 100.0) as i32 {
        90 => 1.645,
        95 => 1.96,
        99 => 2.576,
        _ => 1.96,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_band() {
        let forecast = vec![10.0, 20.0];
        let interval = ForecastInterval::from_point_forecast(&forecast, 1.0, 0.95);
        assert_eq!(interval.lower, vec![10.0 - 1.96, 20.0 - 1.96]);
        assert_eq!(interval.upper, vec![10.0 + 1.96, 20.0 + 1.96]);
    }

    #[test]
    fn test_lower_bound_clamped_at_zero() {
        let forecast = vec![0.5];
        let interval = ForecastInterval::from_point_forecast(&forecast, 2.0, 0.95);
        assert_eq!(interval.lower, vec![0.0]);
        assert!((interval.upper[0] - (0.5 + 3.92)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_residual_std_collapses_band() {
        let forecast = vec![3.0, 4.0];
        let interval = ForecastInterval::from_point_forecast(&forecast, 0.0, 0.95);
        assert_eq!(interval.lower, forecast);
        assert_eq!(interval.upper, forecast);
    }

    #[test]
    fn test_degenerate_band() {
        let forecast = vec![5.0, 5.0, 5.0];
        let interval = ForecastInterval::degenerate(&forecast);
        assert_eq!(interval.lower, forecast);
        assert_eq!(interval.upper, forecast);
        assert_eq!(interval.len(), 3);
    }

    #[test]
    fn test_confidence_level_quantiles() {
        let forecast = vec![100.0];
        let narrow = ForecastInterval::from_point_forecast(&forecast, 1.0, 0.90);
        let wide = ForecastInterval::from_point_forecast(&forecast, 1.0, 0.99);
        assert!(narrow.upper[0] < wide.upper[0]);
        assert!((narrow.upper[0] - 101.645).abs() < 1e-12);
        assert!((wide.upper[0] - 102.576).abs() < 1e-12);
    }
}
