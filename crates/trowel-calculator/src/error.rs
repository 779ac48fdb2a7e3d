//! Error types for the calculator engine.
//!
//! The taxonomy is deliberately small: lookup failures and validation
//! failures are resolved before `calculate` runs, and anything raised
//! inside `calculate` surfaces as a single computation error. Calculations
//! are deterministic and idempotent, so nothing here is retryable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// The requested calculator type was never registered.
    #[error("unknown calculator type: {type_id}")]
    UnknownCalculator { type_id: String },

    /// Inputs failed validation; no partial result is produced.
    #[error("invalid inputs: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// An input combination outside the declared schema's safe range made
    /// the formula degenerate (for example a zero coverage override).
    /// Treated as a client error, not a system fault.
    #[error("computation error: {message}")]
    Computation { message: String },
}

impl CalcError {
    pub fn computation(message: impl Into<String>) -> Self {
        CalcError::Computation { message: message.into() }
    }
}
