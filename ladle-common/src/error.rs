//! Common error types for Ladle

use thiserror::Error;

/// Common result type for Ladle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Ladle service
///
/// The caller-facing variants (`Unauthenticated` through `InvalidCredential`)
/// carry the exact message shown to the user; infrastructure variants wrap
/// their source and are rendered as a generic internal error at the HTTP
/// boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No valid caller identity
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed to act on this resource
    #[error("{0}")]
    Forbidden(String),

    /// Requested resource not found
    #[error("{0}")]
    NotFound(String),

    /// Referential-integrity or uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Invalid user input or request parameter
    #[error("{0}")]
    InvalidInput(String),

    /// Supplied credential does not match the stored one
    #[error("{0}")]
    InvalidCredential(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
