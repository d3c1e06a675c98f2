//! Error types for loading rate tables and loan scenarios
//!
//! The calculation engine itself never fails; these errors only come from the
//! file-backed collaborators around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown rate name: {0}")]
    UnknownRate(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidRateValue { name: String, value: String },

    #[error("Invalid rate table: {0}")]
    InvalidRateTable(String),

    #[error("Invalid loan scenario at row {row}: {reason}")]
    InvalidScenario { row: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, MortgageError>;
