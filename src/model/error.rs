//! Cost model error types
//!
//! Defines the errors the cost model can report. Malformed user input is not
//! one of them: the form layer substitutes defaults before the model runs.

use thiserror::Error;

/// Errors that can occur while evaluating the cost model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Combined first-visit fee is zero, so the break-even ratio is undefined
    #[error("Break-even interval is undefined: first-visit fee plus other fee is zero")]
    DegenerateFees,

    /// An interval of zero or less cannot be priced
    #[error("Interval must be positive, got {0}")]
    NonPositiveInterval(f64),

    /// A sweep parameter is outside its allowed range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ModelError {
    /// Short machine-readable code, used by the API and the CLI readout
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DegenerateFees => "DEGENERATE_FEES",
            ModelError::NonPositiveInterval(_) => "NON_POSITIVE_INTERVAL",
            ModelError::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }
}

/// Result type alias for cost model operations
pub type ModelResult<T> = Result<T, ModelError>;
