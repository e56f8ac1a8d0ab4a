//! Error types shared by every VeriDegree machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable failure taxonomy.
///
/// Each machine has its own error enum and numeric codes, but every failure
/// maps onto exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required role (admin or owner).
    NotAuthorized,
    /// Operation blocked because the governing pause flag is set.
    ContractPaused,
    /// Referenced credential id has no record.
    CredentialNotFound,
    /// Operation blocked because the credential is revoked.
    CredentialRevoked,
    /// Recipient or verifier is the reserved null address.
    InvalidRecipient,
    /// A required text field is empty, or batch list lengths mismatch.
    InvalidMetadata,
    /// Batch list length exceeds the configured maximum.
    BatchSizeExceeded,
    /// Proposed linked registry reference fails a sanity check.
    InvalidAccessContract,
    /// Revoke attempted with no prior grant record.
    AccessNotFound,
    /// Batch verification hit a missing or revoked credential.
    CredentialRevokedOrMissing,
}

impl ErrorKind {
    /// The kind's name, as used in logs and host-facing payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotAuthorized => "NotAuthorized",
            ErrorKind::ContractPaused => "ContractPaused",
            ErrorKind::CredentialNotFound => "CredentialNotFound",
            ErrorKind::CredentialRevoked => "CredentialRevoked",
            ErrorKind::InvalidRecipient => "InvalidRecipient",
            ErrorKind::InvalidMetadata => "InvalidMetadata",
            ErrorKind::BatchSizeExceeded => "BatchSizeExceeded",
            ErrorKind::InvalidAccessContract => "InvalidAccessContract",
            ErrorKind::AccessNotFound => "AccessNotFound",
            ErrorKind::CredentialRevokedOrMissing => "CredentialRevokedOrMissing",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input validation failures, before any machine-specific context is added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("address is the reserved null address")]
    NullAddress,

    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("batch of {len} elements exceeds maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("batch lists have mismatched lengths")]
    LengthMismatch,
}

impl ValidationError {
    /// Map onto the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NullAddress => ErrorKind::InvalidRecipient,
            ValidationError::EmptyField(_) | ValidationError::LengthMismatch => {
                ErrorKind::InvalidMetadata
            }
            ValidationError::BatchTooLarge { .. } => ErrorKind::BatchSizeExceeded,
        }
    }
}

/// Snapshot encoding errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    /// Decoded cleanly, but the state breaks a ledger invariant.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}
