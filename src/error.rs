//! Error types for engine input validation and data loading

use thiserror::Error;

/// Invalid input rejected at the planner boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("debt {id}: balance must be non-negative, got {balance}")]
    NegativeBalance { id: String, balance: f64 },

    #[error("debt {id}: minimum payment must be non-negative, got {min_payment}")]
    NegativeMinPayment { id: String, min_payment: f64 },

    #[error("debt {id}: APR must be non-negative, got {apr}")]
    NegativeRate { id: String, apr: f64 },

    #[error("extra monthly payment must be non-negative, got {0}")]
    NegativeExtraPayment(f64),

    #[error("{field} must be a finite number")]
    NonFinite { field: String },
}

/// Failure while reading a debt list or finance document from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date {value:?} in row {row}: {source}")]
    Date {
        row: usize,
        value: String,
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Invalid(#[from] EngineError),
}
