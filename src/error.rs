//! Error types for the isapi library.

use thiserror::Error;

/// Main error type for isapi operations.
#[derive(Error, Debug)]
pub enum IsApiError {
    /// Network-level failure (DNS, timeout, connection reset).
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Unexpected HTTP status or a response body of the wrong shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server rejects the account type for this operation.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// The server reported an application-level failure.
    ///
    /// The payload is the server's literal message.
    #[error("API error: {0}")]
    Api(String),

    /// The queried path does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A file operation was attempted on a directory.
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// Local I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A local or remote path that cannot be used for the operation.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// An argument combination the operation does not accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// API key string is not in `login:secret` form.
    #[error("Invalid credential: expected `login:secret`")]
    InvalidCredential,

    /// Malformed wire timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl IsApiError {
    /// The server's literal message for API-level errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            IsApiError::Api(msg) | IsApiError::FileNotFound(msg) | IsApiError::IsADirectory(msg) => {
                Some(msg)
            }
            _ => None,
        }
    }

    /// Check if this error belongs to the protocol class (bad status or body).
    pub fn is_protocol(&self) -> bool {
        matches!(self, IsApiError::Protocol(_) | IsApiError::Json(_))
    }
}

/// Result type alias for isapi operations.
pub type Result<T> = std::result::Result<T, IsApiError>;
