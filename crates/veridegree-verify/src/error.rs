//! Error types for the verification registry.

use thiserror::Error;
use veridegree_core::{CredentialId, ErrorKind};

/// Errors reported by the verification registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The credential does not exist or has been revoked.
    #[error("credential {0} is revoked or missing")]
    CredentialRevokedOrMissing(CredentialId),
}

impl VerificationError {
    /// Map onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::CredentialRevokedOrMissing(_) => {
                ErrorKind::CredentialRevokedOrMissing
            }
        }
    }

    /// Numeric failure code reported to hosts.
    pub fn code(&self) -> u32 {
        match self {
            VerificationError::CredentialRevokedOrMissing(_) => 302,
        }
    }
}

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, VerificationError>;
