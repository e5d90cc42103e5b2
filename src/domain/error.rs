//! Error types for the inclusive board core.
//!
//! This module defines the centralized error type [`BoardError`] and a type alias
//! [`Result`] used throughout the crate. Reads from persisted storage never produce
//! these errors (they fall back to documented defaults); only writes, explicit
//! validation and configuration loading do.

use thiserror::Error;

/// The main error type for inclusive board operations.
///
/// # Examples
///
/// ```
/// use inclusive_board::BoardError;
///
/// fn validate_email(email: &str) -> Result<(), BoardError> {
///     if email.is_empty() {
///         return Err(BoardError::Validation("email is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_email("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum BoardError {
    /// Storage backend rejected an operation.
    ///
    /// The string describes which key or file was involved.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for persistence.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// User-supplied input failed validation (e.g. an empty chat profile).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for inclusive board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = BoardError::Storage("learning:state".to_string());
        assert_eq!(err.to_string(), "Storage error: learning:state");

        let err = BoardError::Validation("name is required".to_string());
        assert!(err.to_string().starts_with("Validation error"));
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: BoardError = json_err.into();
        assert!(matches!(err, BoardError::Serialization(_)));
    }
}
