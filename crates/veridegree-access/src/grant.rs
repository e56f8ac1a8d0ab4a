//! Grant, history, and audit records.

use std::fmt;

use serde::{Deserialize, Serialize};
use veridegree_core::{Address, CredentialId, Timestamp};

/// Key of every access record: which credential, which verifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessKey {
    pub credential_id: CredentialId,
    pub verifier: Address,
}

impl AccessKey {
    pub fn new(credential_id: CredentialId, verifier: Address) -> Self {
        Self {
            credential_id,
            verifier,
        }
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.credential_id, self.verifier)
    }
}

/// Whether a verifier may currently see a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub allowed: bool,
}

/// Latest grant/revoke pair for a key.
///
/// Only the most recent pair survives. A re-grant replaces `granted_at` and
/// clears `revoked_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessHistory {
    /// Time of the most recent grant.
    pub granted_at: Timestamp,

    /// Time of the most recent revoke, if any since the last grant.
    pub revoked_at: Option<Timestamp>,
}

impl AccessHistory {
    /// A fresh history for a grant made at `at`.
    pub fn granted(at: Timestamp) -> Self {
        Self {
            granted_at: at,
            revoked_at: None,
        }
    }

    /// Stamp a revoke, keeping the grant time.
    pub fn revoke(&mut self, at: Timestamp) {
        self.revoked_at = Some(at);
    }
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessAction {
    Granted,
    Revoked,
}

/// One entry in the append-only access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    pub action: AccessAction,
    pub at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_revoke_keeps_grant_time() {
        let mut history = AccessHistory::granted(Timestamp::new(100));
        history.revoke(Timestamp::new(101));

        assert_eq!(history.granted_at, Timestamp::new(100));
        assert_eq!(history.revoked_at, Some(Timestamp::new(101)));
    }

    #[test]
    fn test_keys_order_by_credential_then_verifier() {
        let a = AccessKey::new(CredentialId::new(1), Address::new("B"));
        let b = AccessKey::new(CredentialId::new(2), Address::new("A"));
        let c = AccessKey::new(CredentialId::new(2), Address::new("B"));
        assert!(a < b);
        assert!(b < c);
    }
}
