//! Error types for keycard issuance
//!
//! The keycard lifecycle itself never fails once a card exists: activation,
//! extension and access recording are all infallible. Only issuance can reject its
//! input.

use thiserror::Error;

/// Errors raised while issuing a keycard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyCardError {
    /// Issuance parameters were malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl KeyCardError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            KeyCardError::InvalidArgument(_) => "Invalid Argument",
        }
    }
}

/// Result type for keycard operations
pub type KeyCardResult<T> = Result<T, KeyCardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let error = KeyCardError::invalid_argument("card number must not be empty");
        assert_eq!(error.to_string(), "Invalid argument: card number must not be empty");
        assert_eq!(error.category(), "Invalid Argument");
    }
}
