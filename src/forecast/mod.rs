//! Time-series forecasting.
//!
//! The engine turns a flat history of observations into sliding-window
//! training pairs, fits a random forest on them, rolls the model forward
//! over the requested horizon, and bounds each step with a residual-based
//! uncertainty band. Histories too short to train on get a persistence
//! forecast instead.

pub mod engine;
pub mod interval;

pub use engine::{EngineConfig, EngineConfigBuilder, Forecast, ForecastEngine, ForecastMethod};
pub use interval::ForecastInterval;
