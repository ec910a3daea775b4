// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Normal misuse of the board (blank names, bad indices, undo with nothing
/// to undo) is never an error; see [`crate::domain::DomainError`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Storage(String)
