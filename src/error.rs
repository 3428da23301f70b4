//! Error types for fx_exchange

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for exchange operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Invalid exchange rate for {currency}: {rate} (must be a positive finite number)")]
    InvalidRate { currency: String, rate: f64 },

    #[error("Invalid amount: {0} (must be a non-negative finite number)")]
    InvalidAmount(f64),

    #[error("Invalid rate snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("At least one candidate currency is required")]
    EmptyCandidateList,

    #[error("Persistence error for {}: {reason}", path.display())]
    PersistenceError { path: PathBuf, reason: String },
}

impl ExchangeError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExchangeError::PersistenceError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;
