//! Error types for the unified ledger.

use thiserror::Error;
use veridegree_access::AccessError;
use veridegree_core::{CodecError, ErrorKind};
use veridegree_registry::RegistryError;
use veridegree_verify::VerificationError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Credential registry error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Access-control error.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Verification error.
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    /// Snapshot encoding error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LedgerError {
    /// The taxonomy kind, for errors raised by a machine.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LedgerError::Registry(e) => Some(e.kind()),
            LedgerError::Access(e) => Some(e.kind()),
            LedgerError::Verification(e) => Some(e.kind()),
            LedgerError::Codec(_) | LedgerError::Config(_) => None,
        }
    }

    /// The machine's numeric failure code, for errors raised by a machine.
    pub fn code(&self) -> Option<u32> {
        match self {
            LedgerError::Registry(e) => Some(e.code()),
            LedgerError::Access(e) => Some(e.code()),
            LedgerError::Verification(e) => Some(e.code()),
            LedgerError::Codec(_) | LedgerError::Config(_) => None,
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
