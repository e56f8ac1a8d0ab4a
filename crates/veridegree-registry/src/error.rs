//! Error types for the credential registry.

use thiserror::Error;
use veridegree_core::{Address, CredentialId, ErrorKind, ValidationError};

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the admin (or not the owner, for transfers).
    #[error("not authorized: {0}")]
    NotAuthorized(Address),

    /// Registry is paused.
    #[error("registry is paused")]
    ContractPaused,

    /// No credential with this id.
    #[error("credential not found: {0}")]
    CredentialNotFound(CredentialId),

    /// Credential is revoked.
    #[error("credential revoked: {0}")]
    CredentialRevoked(CredentialId),

    /// Recipient is the null address.
    #[error("invalid recipient: null address")]
    InvalidRecipient,

    /// Empty text field or mismatched batch lists.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Batch too large.
    #[error("batch of {len} exceeds maximum of {max}")]
    BatchSizeExceeded { len: usize, max: usize },
}

impl RegistryError {
    /// Map onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotAuthorized(_) => ErrorKind::NotAuthorized,
            RegistryError::ContractPaused => ErrorKind::ContractPaused,
            RegistryError::CredentialNotFound(_) => ErrorKind::CredentialNotFound,
            RegistryError::CredentialRevoked(_) => ErrorKind::CredentialRevoked,
            RegistryError::InvalidRecipient => ErrorKind::InvalidRecipient,
            RegistryError::InvalidMetadata(_) => ErrorKind::InvalidMetadata,
            RegistryError::BatchSizeExceeded { .. } => ErrorKind::BatchSizeExceeded,
        }
    }

    /// Numeric failure code reported to hosts.
    pub fn code(&self) -> u32 {
        match self {
            RegistryError::NotAuthorized(_) => 100,
            RegistryError::CredentialRevoked(_) => 102,
            RegistryError::CredentialNotFound(_) => 103,
            RegistryError::InvalidRecipient => 104,
            RegistryError::InvalidMetadata(_) => 105,
            RegistryError::BatchSizeExceeded { .. } => 106,
            RegistryError::ContractPaused => 107,
        }
    }
}

impl From<ValidationError> for RegistryError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::NullAddress => RegistryError::InvalidRecipient,
            ValidationError::EmptyField(_) | ValidationError::LengthMismatch => {
                RegistryError::InvalidMetadata(e.to_string())
            }
            ValidationError::BatchTooLarge { len, max } => {
                RegistryError::BatchSizeExceeded { len, max }
            }
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
