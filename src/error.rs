//! Error types for grad_savings
//!
//! This module defines domain-specific error types that provide clear,
//! actionable error messages to users.

use thiserror::Error;

/// Validation errors for user input, raised by the TUI edit dialog and by
/// the CLI amount flags.
///
/// These errors are shown directly to users and should be clear and actionable.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Amount is required")]
    AmountRequired,

    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    #[error("Amount cannot be negative, got {0}")]
    NegativeAmount(f64),

    #[error("Amounts are whole numbers, got {0}")]
    FractionalAmount(String),

    #[error("'{0}' is a yes/no option, press space to toggle it")]
    NotAnAmount(&'static str),
}

/// Parses a user-typed amount. Accepts non-negative whole numbers only.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AmountRequired);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::InvalidAmount(trimmed.to_string()));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount(value));
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalAmount(trimmed.to_string()));
    }
    Ok(value)
}
