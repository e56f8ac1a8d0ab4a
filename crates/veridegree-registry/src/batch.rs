//! Column-oriented batch issuance input.
//!
//! Hosts often receive a batch as five parallel lists. [`IssueBatch`] holds
//! them as given and only pairs them up once their lengths agree.

use serde::{Deserialize, Serialize};
use veridegree_core::{Address, CredentialDraft, ValidationError};

/// Five parallel lists, one element per credential to issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBatch {
    pub recipients: Vec<Address>,
    pub credential_types: Vec<String>,
    pub issuers: Vec<String>,
    pub recipient_names: Vec<String>,
    pub metadata_uris: Vec<String>,
}

impl IssueBatch {
    /// Number of elements, as given by the recipient list.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether the recipient list is empty.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Pair the lists into drafts, in order.
    ///
    /// Fails with [`ValidationError::LengthMismatch`] unless every list has
    /// the same length as `recipients`.
    pub fn into_drafts(self) -> Result<Vec<CredentialDraft>, ValidationError> {
        let n = self.recipients.len();
        if self.credential_types.len() != n
            || self.issuers.len() != n
            || self.recipient_names.len() != n
            || self.metadata_uris.len() != n
        {
            return Err(ValidationError::LengthMismatch);
        }

        let drafts = self
            .recipients
            .into_iter()
            .zip(self.credential_types)
            .zip(self.issuers)
            .zip(self.recipient_names)
            .zip(self.metadata_uris)
            .map(|((((recipient, ty), issuer), name), uri)| {
                CredentialDraft::new(recipient, ty, issuer, name, uri)
            })
            .collect();

        Ok(drafts)
    }
}

impl From<Vec<CredentialDraft>> for IssueBatch {
    fn from(drafts: Vec<CredentialDraft>) -> Self {
        let mut batch = IssueBatch::default();
        for d in drafts {
            batch.recipients.push(d.recipient);
            batch.credential_types.push(d.credential_type);
            batch.issuers.push(d.issuer);
            batch.recipient_names.push(d.recipient_name);
            batch.metadata_uris.push(d.metadata_uri);
        }
        batch
    }
}
