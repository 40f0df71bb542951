//! Custom error types and handling
//!
//! This module defines the application's error types. Transport-class errors
//! are special: the data dispatch layer recovers from them by re-routing the
//! failed call to the local store instead of surfacing them to the caller.

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Transport errors (recovered via fallback)
    #[error("API unreachable: {0}")]
    Transport(String),

    #[error("API request timed out")]
    Timeout,

    #[error("API returned status {0}")]
    Status(u16),

    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Local store errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt data in storage slot '{key}': {reason}")]
    CorruptData { key: String, reason: String },

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Whether this error came from the transport layer and the call can be
    /// transparently re-routed to the local store.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout | Self::Status(_)
        )
    }
}

// Implement From for common error types
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if let Some(status) = err.status() {
            AppError::Status(status.as_u16())
        } else if err.is_decode() {
            // A malformed response body is a remote failure like any other
            AppError::Transport(format!("invalid response body: {}", err))
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(AppError::Timeout.is_transport());
        assert!(AppError::Transport("connection refused".to_string()).is_transport());
        assert!(AppError::Status(503).is_transport());

        assert!(!AppError::NotFound("problem 7".to_string()).is_transport());
        assert!(!AppError::Validation("title too short".to_string()).is_transport());
    }
}
