//! Error types for the record registries

use thiserror::Error;

use crate::keycard::KeyCardError;
use crate::types::{EmployeeId, MemberId};

/// Errors raised by member, employee and card registries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No member with this id
    #[error("Member with ID {0} not found")]
    MemberNotFound(MemberId),

    /// No employee with this id
    #[error("Employee with ID {0} not found")]
    EmployeeNotFound(EmployeeId),

    /// No card with this number
    #[error("Keycard {0} not found")]
    CardNotFound(String),

    /// A card with this number already exists
    #[error("Keycard {0} has already been issued")]
    DuplicateCardNumber(String),

    /// The card number generator ran out of free numbers for a prefix
    #[error("No free card numbers left for prefix {0}")]
    CardNumbersExhausted(String),

    /// A record failed validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Keycard issuance failed
    #[error(transparent)]
    KeyCard(#[from] KeyCardError),
}

impl RegistryError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether the error is a failed lookup
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::MemberNotFound(_)
                | RegistryError::EmployeeNotFound(_)
                | RegistryError::CardNotFound(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            RegistryError::MemberNotFound(_)
            | RegistryError::EmployeeNotFound(_)
            | RegistryError::CardNotFound(_) => "Not Found",
            RegistryError::DuplicateCardNumber(_) => "Duplicate",
            RegistryError::CardNumbersExhausted(_) => "Exhausted",
            RegistryError::InvalidArgument(_) | RegistryError::KeyCard(_) => "Invalid Argument",
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
