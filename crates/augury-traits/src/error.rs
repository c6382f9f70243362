//! Error types for the Augury workspace.
//!
//! A single error enum covers input validation, table ingestion and
//! evaluation failures so that every library crate speaks the same language.

use thiserror::Error;

/// The main error type for Augury operations.
#[derive(Debug, Error)]
pub enum AuguryError {
    /// Not enough aligned observations to compute a single return.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A price was zero, negative or not finite.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when a required column is missing from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when a date cannot be parsed or constructed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for AuguryError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for AuguryError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Augury operations.
pub type Result<T> = std::result::Result<T, AuguryError>;
