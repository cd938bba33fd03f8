//! Error types for the demand_forecast crate

use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to series validation or construction
    #[error("Series error: {0}")]
    SeriesError(String),

    /// Error related to input validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid model parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested horizon is unusable
    #[error("invalid horizon: {0} (must be at least 1 week)")]
    InvalidHorizon(usize),

    /// Fit precondition failure: the series is too short
    #[error("insufficient history: need at least {needed} weekly points, got {got}")]
    InsufficientHistory { needed: usize, got: usize },
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
