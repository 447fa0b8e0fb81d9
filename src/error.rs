use thiserror::Error;

/// Error taxonomy for the forecast service.
///
/// The enumeration is deliberately closed: the transport layer maps each
/// kind to its own response instead of collapsing every failure into one
/// status.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied something the engine cannot act on: a series too
    /// short for the requested window, a non-positive window or horizon, or
    /// a non-numeric entry. Recoverable by fixing the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No training pair can be formed from the given history. Raised by the
    /// dataset builder when the series is no longer than the window.
    #[error("insufficient data: series of length {length} yields no training pair for window {window}")]
    InsufficientData { length: usize, window: usize },

    /// A computation-time failure inside the engine, with the proximate
    /// cause attached. Not recoverable by adjusting the request.
    #[error("engine failure: {0}")]
    EngineFailure(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
