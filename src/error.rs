// src/error.rs
use thiserror::Error;

/// Custom error types for the payoff-diagram library
///
/// The valuation core itself is total over numeric input and never returns
/// these; they surface from loaders, session updates and opt-in validation.
#[derive(Debug, Error)]
pub enum PayoffError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Instrument name outside the closed set of kinds
    #[error("Unknown instrument kind '{name}'")]
    UnknownInstrument { name: String },

    /// No position carries this id
    #[error("No position with id {id}")]
    UnknownPosition { id: u64 },

    /// No preset strategy registered under this key
    #[error("Unknown strategy '{key}'")]
    UnknownStrategy { key: String },

    #[error("Portfolio (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for payoff-diagram operations
pub type PayoffResult<T> = Result<T, PayoffError>;

/// Validation utilities
pub mod validation {
    use super::{PayoffError, PayoffResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PayoffResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(PayoffError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PayoffResult<()> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(PayoffError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is within a range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> PayoffResult<()> {
        if value < min || value > max {
            Err(PayoffError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PayoffResult<()> {
        if !value.is_finite() {
            Err(PayoffError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the number of sample points for a curve
    pub fn validate_points(points: usize) -> PayoffResult<()> {
        if points < 2 {
            Err(PayoffError::InvalidConfiguration {
                field: "points".to_string(),
                reason: "at least 2 points are needed to span a range".to_string(),
            })
        } else if points > 1_000_000 {
            Err(PayoffError::InvalidConfiguration {
                field: "points".to_string(),
                reason: "exceeds maximum allowed (1 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
