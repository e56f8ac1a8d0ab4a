//! The credential record and its issuance draft.

use serde::{Deserialize, Serialize};

use crate::types::{Address, CredentialId, Timestamp};

/// An issued credential.
///
/// `revoked` only ever moves from `false` to `true`. Revocation never
/// deletes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Dense id assigned at issuance.
    pub id: CredentialId,

    /// Kind of claim, e.g. "Diploma".
    pub credential_type: String,

    /// Issuing institution.
    pub issuer: String,

    /// Name of the person the credential was issued to.
    pub recipient_name: String,

    /// Ledger time at issuance.
    pub issue_date: Timestamp,

    /// Whether the credential has been revoked.
    pub revoked: bool,

    /// Opaque pointer to off-ledger content.
    pub metadata_uri: String,
}

impl Credential {
    /// Whether the credential is still valid (not revoked).
    pub fn is_valid(&self) -> bool {
        !self.revoked
    }

    /// Mark the credential revoked. Idempotent.
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

/// Everything needed to issue one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    /// Initial owner of the credential.
    pub recipient: Address,
    pub credential_type: String,
    pub issuer: String,
    pub recipient_name: String,
    pub metadata_uri: String,
}

impl CredentialDraft {
    /// Create a new draft.
    pub fn new(
        recipient: impl Into<Address>,
        credential_type: impl Into<String>,
        issuer: impl Into<String>,
        recipient_name: impl Into<String>,
        metadata_uri: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            credential_type: credential_type.into(),
            issuer: issuer.into(),
            recipient_name: recipient_name.into(),
            metadata_uri: metadata_uri.into(),
        }
    }

    /// Turn the draft into a live credential, returning it with its owner.
    pub fn into_credential(self, id: CredentialId, issue_date: Timestamp) -> (Address, Credential) {
        let credential = Credential {
            id,
            credential_type: self.credential_type,
            issuer: self.issuer,
            recipient_name: self.recipient_name,
            issue_date,
            revoked: false,
            metadata_uri: self.metadata_uri,
        };
        (self.recipient, credential)
    }
}
