//! aircast: air-quality index forecasting service.
//!
//! The core is a stateless forecast engine: it builds a sliding-window
//! dataset from a raw history, trains a random-forest regressor per
//! request, predicts iteratively over the horizon, and derives a
//! residual-based uncertainty band. A thin axum shell exposes the engine
//! over HTTP.

pub mod dataset;
pub mod error;
pub mod forecast;
pub mod ml;
pub mod series;
pub mod server;
pub mod stats;

// Re-export commonly used types
pub use dataset::WindowedDataset;
pub use error::{Error, Result};
pub use forecast::{Forecast, ForecastEngine, ForecastInterval, ForecastMethod};
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
