//! Cross-machine lookup traits.
//!
//! The access-control ledger and the verification registry never share
//! state with the credential registry. They consult it through
//! [`CredentialLookup`], which lets tests and hosts swap in any
//! implementation. The registry can likewise hold an [`AccessLookup`].

use crate::credential::Credential;
use crate::types::{Address, CredentialId};

/// Liveness of a credential as seen by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// No credential with this id was ever issued.
    Missing,
    /// Issued, then revoked.
    Revoked,
    /// Issued and not revoked.
    Active,
}

impl CredentialStatus {
    /// Whether the credential exists and is not revoked.
    pub fn is_active(self) -> bool {
        matches!(self, CredentialStatus::Active)
    }
}

/// Read-only view of credential ownership and validity.
///
/// Implementations must answer from current state on every call; callers
/// never cache answers across operations.
pub trait CredentialLookup: Send + Sync {
    /// The current owner, or `None` if the credential does not exist.
    fn owner_of(&self, id: CredentialId) -> Option<Address>;

    /// The credential record, or `None` if it does not exist.
    fn credential(&self, id: CredentialId) -> Option<Credential>;

    /// Number of credentials ever issued.
    fn total_credentials(&self) -> u64;

    /// Whether the credential exists and whether it is revoked.
    fn status(&self, id: CredentialId) -> CredentialStatus {
        match self.credential(id) {
            None => CredentialStatus::Missing,
            Some(c) if c.revoked => CredentialStatus::Revoked,
            Some(_) => CredentialStatus::Active,
        }
    }
}

/// Read-only view of verifier grants.
pub trait AccessLookup: Send + Sync {
    /// Whether `verifier` is currently allowed to see credential `id`.
    ///
    /// Returns `false` when no grant was ever made.
    fn is_allowed(&self, id: CredentialId, verifier: &Address) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use std::collections::HashMap;

    struct Fixed(HashMap<CredentialId, (Address, Credential)>);

    impl CredentialLookup for Fixed {
        fn owner_of(&self, id: CredentialId) -> Option<Address> {
            self.0.get(&id).map(|(owner, _)| owner.clone())
        }

        fn credential(&self, id: CredentialId) -> Option<Credential> {
            self.0.get(&id).map(|(_, c)| c.clone())
        }

        fn total_credentials(&self) -> u64 {
            self.0.len() as u64
        }
    }

    fn credential(id: u64, revoked: bool) -> Credential {
        Credential {
            id: CredentialId::new(id),
            credential_type: "Diploma".into(),
            issuer: "Uni".into(),
            recipient_name: "Jane".into(),
            issue_date: Timestamp::new(1),
            revoked,
            metadata_uri: "ipfs://x".into(),
        }
    }

    #[test]
    fn test_default_status() {
        let mut map = HashMap::new();
        map.insert(CredentialId::new(1), (Address::new("A"), credential(1, false)));
        map.insert(CredentialId::new(2), (Address::new("B"), credential(2, true)));
        let lookup = Fixed(map);

        assert_eq!(lookup.status(CredentialId::new(1)), CredentialStatus::Active);
        assert_eq!(lookup.status(CredentialId::new(2)), CredentialStatus::Revoked);
        assert_eq!(lookup.status(CredentialId::new(3)), CredentialStatus::Missing);
        assert!(lookup.status(CredentialId::new(1)).is_active());
        assert!(!lookup.status(CredentialId::new(2)).is_active());
    }
}
