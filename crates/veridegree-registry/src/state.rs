//! Registry state.
//!
//! The maps and counters behind [`CredentialRegistry`]. Methods here do no
//! authorization and no pause checks; callers validate first, then apply.
//!
//! [`CredentialRegistry`]: crate::CredentialRegistry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use veridegree_core::{Address, CodecError, Credential, CredentialDraft, CredentialId, Timestamp};

use crate::error::{RegistryError, Result};

/// Credential records, ownership, and issuance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// All credentials ever issued, revoked ones included.
    credentials: BTreeMap<CredentialId, Credential>,

    /// Current owner of each credential. Absent means never issued.
    owners: BTreeMap<CredentialId, Address>,

    /// High-water mark of assigned ids.
    last_credential_id: u64,

    /// Count of successful issuances. Never decremented.
    total_credentials: u64,
}

impl RegistryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next issuance will receive.
    pub fn next_id(&self) -> CredentialId {
        CredentialId::new(self.last_credential_id + 1)
    }

    /// Store a validated draft under the next id.
    pub fn apply_issue(&mut self, draft: CredentialDraft, now: Timestamp) -> CredentialId {
        let id = self.next_id();
        let (owner, credential) = draft.into_credential(id, now);

        self.credentials.insert(id, credential);
        self.owners.insert(id, owner);
        self.last_credential_id = id.get();
        self.total_credentials += 1;

        id
    }

    /// Mark a credential revoked. Revoking twice is a no-op.
    pub fn apply_revoke(&mut self, id: CredentialId) -> Result<()> {
        let credential = self
            .credentials
            .get_mut(&id)
            .ok_or(RegistryError::CredentialNotFound(id))?;
        credential.revoke();
        Ok(())
    }

    /// Replace the owner of an existing credential.
    pub fn apply_transfer(&mut self, id: CredentialId, recipient: Address) -> Result<()> {
        let owner = self
            .owners
            .get_mut(&id)
            .ok_or(RegistryError::CredentialNotFound(id))?;
        *owner = recipient;
        Ok(())
    }

    /// Get a credential by id.
    pub fn credential(&self, id: CredentialId) -> Option<&Credential> {
        self.credentials.get(&id)
    }

    /// Get the current owner of a credential.
    pub fn owner(&self, id: CredentialId) -> Option<&Address> {
        self.owners.get(&id)
    }

    /// High-water mark of assigned ids (0 before the first issuance).
    pub fn last_credential_id(&self) -> u64 {
        self.last_credential_id
    }

    /// Number of credentials ever issued.
    pub fn total_credentials(&self) -> u64 {
        self.total_credentials
    }

    /// Ids currently owned by `owner`, ascending.
    pub fn owned_by(&self, owner: &Address) -> Vec<CredentialId> {
        self.owners
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Check a decoded state against the invariants `apply_*` maintain.
    ///
    /// Ids are dense from 1, so the stored keys must be exactly
    /// `1..=last_credential_id`, every credential must have an owner, and
    /// no owner may be the null address.
    pub fn check_consistency(&self) -> std::result::Result<(), CodecError> {
        let count = self.credentials.len() as u64;
        if self.total_credentials != count {
            return Err(inconsistent(format!(
                "total_credentials is {} but {} credentials are stored",
                self.total_credentials, count
            )));
        }
        if self.last_credential_id != count {
            return Err(inconsistent(format!(
                "last_credential_id is {} but {} credentials are stored",
                self.last_credential_id, count
            )));
        }
        for (expected, (key, credential)) in (1..=count).zip(&self.credentials) {
            if key.get() != expected || credential.id != *key {
                return Err(inconsistent(format!("credential ids are not dense at {key}")));
            }
        }
        if !self.owners.keys().eq(self.credentials.keys()) {
            return Err(inconsistent("owner and credential ids differ".to_string()));
        }
        if let Some((id, _)) = self.owners.iter().find(|(_, owner)| owner.is_null()) {
            return Err(inconsistent(format!("credential {id} is owned by the null address")));
        }
        Ok(())
    }
}

fn inconsistent(reason: String) -> CodecError {
    CodecError::Inconsistent(reason)
}
