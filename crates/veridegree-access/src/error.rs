//! Error types for the access-control ledger.

use thiserror::Error;
use veridegree_core::{Address, CredentialId, ErrorKind};

/// Errors that can occur during access-control operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller is not the admin (or not the credential owner).
    #[error("not authorized: {0}")]
    NotAuthorized(Address),

    /// The registry has no such credential.
    #[error("credential not found: {0}")]
    CredentialNotFound(CredentialId),

    /// Verifier is the null address.
    #[error("invalid verifier: null address")]
    InvalidRecipient,

    /// Ledger is paused.
    #[error("access control is paused")]
    ContractPaused,

    /// Batch too large.
    #[error("batch of {len} exceeds maximum of {max}")]
    BatchSizeExceeded { len: usize, max: usize },

    /// Proposed registry reference is unusable.
    #[error("invalid registry reference: {0}")]
    InvalidAccessContract(String),

    /// Revoke without a prior grant.
    #[error("no access record for credential {credential_id} and verifier {verifier}")]
    AccessNotFound {
        credential_id: CredentialId,
        verifier: Address,
    },
}

impl AccessError {
    /// Map onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::NotAuthorized(_) => ErrorKind::NotAuthorized,
            AccessError::CredentialNotFound(_) => ErrorKind::CredentialNotFound,
            AccessError::InvalidRecipient => ErrorKind::InvalidRecipient,
            AccessError::ContractPaused => ErrorKind::ContractPaused,
            AccessError::BatchSizeExceeded { .. } => ErrorKind::BatchSizeExceeded,
            AccessError::InvalidAccessContract(_) => ErrorKind::InvalidAccessContract,
            AccessError::AccessNotFound { .. } => ErrorKind::AccessNotFound,
        }
    }

    /// Numeric failure code reported to hosts.
    pub fn code(&self) -> u32 {
        match self {
            AccessError::NotAuthorized(_) => 200,
            AccessError::CredentialNotFound(_) => 201,
            AccessError::InvalidRecipient => 202,
            AccessError::ContractPaused => 203,
            AccessError::BatchSizeExceeded { .. } => 204,
            AccessError::InvalidAccessContract(_) => 205,
            AccessError::AccessNotFound { .. } => 206,
        }
    }
}

/// Result type for access-control operations.
pub type Result<T> = std::result::Result<T, AccessError>;
