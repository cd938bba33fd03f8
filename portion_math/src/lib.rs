//! # Portion Math
//!
//! Pure arithmetic for restaurant purchasing: converting weekly sales
//! weight into portion counts, and projecting what-if scenarios over
//! per-product base sales. No I/O, no state.

use thiserror::Error;

pub mod portions;
pub mod scenario;

/// Errors that can occur in portion and scenario calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parameter out of range: {0}")]
    OutOfRange(String),
}

/// Result type for portion math operations
pub type Result<T> = std::result::Result<T, MathError>;
