//! The forecast engine: training, iterative prediction, and the
//! degraded-data fallback.

use log::debug;
use serde::Serialize;

use crate::dataset::WindowedDataset;
use crate::error::{Error, Result};
use crate::forecast::interval::ForecastInterval;
use crate::ml::metrics::mean_squared_error;
use crate::ml::models::{RandomForestConfig, RandomForestRegressor, Regressor};
use crate::series::Series;
use crate::stats;

/// How a forecast was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Random forest over sliding windows, iterated over the horizon.
    WindowedForest,
    /// Persistence fallback: every step repeats the last observation.
    Persistence,
}

impl ForecastMethod {
    /// Model-identifier string reported to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::WindowedForest => "rfr_window",
            ForecastMethod::Persistence => "persistence",
        }
    }
}

/// A completed forecast: point estimates plus the uncertainty band.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    /// Point estimates in chronological order, one per horizon step
    pub values: Vec<f64>,
    /// Uncertainty band, same length as `values`
    pub interval: ForecastInterval,
    /// Standard deviation of the held-out residuals (0.0 on the fallback path)
    pub resid_std: f64,
    /// Which path produced the forecast
    pub method: ForecastMethod,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fewest training pairs worth fitting a model on; below this the
    /// engine returns a persistence forecast
    pub min_training_rows: usize,
    /// Fraction of pairs held out for residual estimation
    pub test_fraction: f64,
    /// Confidence level of the uncertainty band
    pub confidence_level: f64,
    /// Seed for the train/held-out split; the forest's bootstrap draws use
    /// the seed in `forest`
    pub random_seed: u64,
    /// Configuration of the underlying forest
    pub forest: RandomForestConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_training_rows: 5,
            test_fraction: 0.2,
            confidence_level: 0.95,
            random_seed: 42,
            forest: RandomForestConfig::default(),
        }
    }
}

/// Builder for EngineConfig
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        EngineConfigBuilder {
            config: EngineConfig::default(),
        }
    }

    pub fn min_training_rows(mut self, rows: usize) -> Self {
        self.config.min_training_rows = rows;
        self
    }

    pub fn test_fraction(mut self, fraction: f64) -> Self {
        self.config.test_fraction = fraction;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Seed both the split and the forest's bootstrap draws.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self.config.forest.random_seed = seed;
        self
    }

    pub fn n_estimators(mut self, n: usize) -> Self {
        self.config.forest.n_estimators = n;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.forest.max_depth = Some(depth);
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless forecasting engine.
///
/// Holds configuration only: every model, training-pair set, and residual
/// set is a request-scoped value dropped when `forecast` returns, so one
/// engine can serve concurrent invocations without synchronization.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        ForecastEngine { config }
    }

    /// Create an engine with default configuration.
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forecast `horizon` future values of `series` from sliding windows of
    /// size `window`.
    ///
    /// Chooses one of two terminal paths per invocation, decided once from
    /// the training-pair count: model training plus iterative prediction,
    /// or the persistence fallback when fewer than
    /// `min_training_rows` pairs exist. The fallback is a data-availability
    /// decision only; training errors are surfaced, never downgraded.
    pub fn forecast(&self, series: &Series, window: usize, horizon: usize) -> Result<Forecast> {
        self.validate_request(series, window, horizon)?;

        // The precondition guarantees at least one pair, so a builder
        // failure here is an invariant violation, not a client error.
        let dataset = WindowedDataset::from_values(series.values(), window).map_err(|e| {
            Error::EngineFailure(format!(
                "dataset construction failed after validation: {}",
                e
            ))
        })?;

        if dataset.len() < self.config.min_training_rows {
            debug!(
                "{} training pairs below minimum {}, using persistence fallback",
                dataset.len(),
                self.config.min_training_rows
            );
            return Ok(self.persistence_forecast(series, horizon));
        }

        self.trained_forecast(series, &dataset, window, horizon)
    }

    fn validate_request(&self, series: &Series, window: usize, horizon: usize) -> Result<()> {
        if window == 0 {
            return Err(Error::InvalidRequest(
                "window must be a positive integer".to_string(),
            ));
        }
        if horizon == 0 {
            return Err(Error::InvalidRequest(
                "horizon must be a positive integer".to_string(),
            ));
        }
        if series.len() < window + 1 {
            return Err(Error::InvalidRequest(format!(
                "need at least {} points in series for window {}, got {}",
                window + 1,
                window,
                series.len()
            )));
        }
        Ok(())
    }

    /// Degraded mode for short histories: repeat the last observation over
    /// the whole horizon with a zero-width band. Never fails.
    fn persistence_forecast(&self, series: &Series, horizon: usize) -> Forecast {
        let last = series.last();
        let values = vec![last; horizon];
        let interval = ForecastInterval::degenerate(&values);
        Forecast {
            values,
            interval,
            resid_std: 0.0,
            method: ForecastMethod::Persistence,
        }
    }

    fn trained_forecast(
        &self,
        series: &Series,
        dataset: &WindowedDataset,
        window: usize,
        horizon: usize,
    ) -> Result<Forecast> {
        let (train_idx, test_idx) = stats::train_test_split(
            dataset.len(),
            self.config.test_fraction,
            self.config.random_seed,
        )?;
        let (x_train, y_train) = dataset.select(&train_idx);
        let (x_test, y_test) = dataset.select(&test_idx);

        let mut model = RandomForestRegressor::new(self.config.forest.clone());
        model.fit(&x_train, &y_train)?;

        // Held-out residuals drive the uncertainty band. Population std,
        // total even for a single held-out row.
        let predicted = model.predict(&x_test)?;
        let residuals: Vec<f64> = y_test
            .iter()
            .zip(predicted.iter())
            .map(|(actual, pred)| actual - pred)
            .collect();
        let resid_std = stats::population_std(&residuals);

        let holdout_mse = mean_squared_error(&y_test, &predicted)?;
        debug!(
            "trained on {} pairs, held out {}, holdout mse {:.4}, resid std {:.4}",
            x_train.len(),
            x_test.len(),
            holdout_mse,
            resid_std
        );

        // Iterative rollout: later steps consume earlier predictions, so
        // uncertainty compounds over the horizon.
        let mut buffer: Vec<f64> = series.tail(window).to_vec();
        let mut values = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = model.predict_row(&buffer[buffer.len() - window..])?;
            values.push(next);
            buffer.push(next);
        }

        let interval = ForecastInterval::from_point_forecast(
            &values,
            resid_std,
            self.config.confidence_level,
        );

        Ok(Forecast {
            values,
            interval,
            resid_std,
            method: ForecastMethod::WindowedForest,
        })
    }
}
