//! Machine-learning building blocks for the forecast engine.
//!
//! The models here operate on plain numeric matrices: each row is a
//! fixed-length window of past observations and each target is the value
//! that followed the window.

pub mod metrics;
pub mod models;

pub use models::{
    RandomForestConfig, RandomForestConfigBuilder, RandomForestRegressor, Regressor,
};
