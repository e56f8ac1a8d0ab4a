//! Access state.
//!
//! Grant flag, history, and log for a key live in one entry, so a grant
//! record never exists without its history and the two are always written
//! together. Methods here do no ownership or pause checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use veridegree_core::{Address, CodecError, CredentialId, Timestamp};

use crate::error::{AccessError, Result};
use crate::grant::{AccessAction, AccessEvent, AccessGrant, AccessHistory, AccessKey};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AccessEntry {
    grant: AccessGrant,
    history: AccessHistory,
    log: Vec<AccessEvent>,
}

/// Flat form of one entry, as it appears in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub key: AccessKey,
    pub grant: AccessGrant,
    pub history: AccessHistory,
    pub log: Vec<AccessEvent>,
}

/// All access records, keyed by (credential, verifier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AccessRecord>", into = "Vec<AccessRecord>")]
pub struct AccessState {
    entries: BTreeMap<AccessKey, AccessEntry>,
}

impl AccessState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `key.verifier`, overwriting any earlier grant or revoke.
    pub fn apply_grant(&mut self, key: AccessKey, now: Timestamp) {
        let event = AccessEvent {
            action: AccessAction::Granted,
            at: now,
        };

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.grant = AccessGrant { allowed: true };
                entry.history = AccessHistory::granted(now);
                entry.log.push(event);
            }
            None => {
                self.entries.insert(
                    key,
                    AccessEntry {
                        grant: AccessGrant { allowed: true },
                        history: AccessHistory::granted(now),
                        log: vec![event],
                    },
                );
            }
        }
    }

    /// Disallow `key.verifier`. The key must have been granted before.
    pub fn apply_revoke(&mut self, key: &AccessKey, now: Timestamp) -> Result<()> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| AccessError::AccessNotFound {
                credential_id: key.credential_id,
                verifier: key.verifier.clone(),
            })?;

        entry.grant = AccessGrant { allowed: false };
        entry.history.revoke(now);
        entry.log.push(AccessEvent {
            action: AccessAction::Revoked,
            at: now,
        });
        Ok(())
    }

    /// Whether the key was ever granted.
    pub fn contains(&self, key: &AccessKey) -> bool {
        self.entries.contains_key(key)
    }

    /// The grant flag, if the key was ever granted.
    pub fn grant(&self, key: &AccessKey) -> Option<AccessGrant> {
        self.entries.get(key).map(|e| e.grant)
    }

    /// Whether the key is currently allowed. `false` if never granted.
    pub fn is_allowed(&self, key: &AccessKey) -> bool {
        self.grant(key).is_some_and(|g| g.allowed)
    }

    /// The latest grant/revoke pair.
    pub fn history(&self, key: &AccessKey) -> Option<AccessHistory> {
        self.entries.get(key).map(|e| e.history)
    }

    /// Every grant and revoke for the key, oldest first.
    pub fn log(&self, key: &AccessKey) -> &[AccessEvent] {
        self.entries.get(key).map(|e| e.log.as_slice()).unwrap_or_default()
    }

    /// Verifiers currently allowed on a credential, sorted.
    pub fn allowed_verifiers(&self, credential_id: CredentialId) -> Vec<Address> {
        self.entries
            .iter()
            .filter(|(k, e)| k.credential_id == credential_id && e.grant.allowed)
            .map(|(k, _)| k.verifier.clone())
            .collect()
    }

    /// Number of keys ever granted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was ever granted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every entry agrees with itself: the grant flag is set
    /// exactly when the history has no revoke, and the log is non-empty and
    /// ends with the matching action.
    pub fn check_consistency(&self) -> std::result::Result<(), CodecError> {
        self.entries
            .iter()
            .try_for_each(|(key, entry)| entry.check(key))
    }
}

impl AccessEntry {
    fn check(&self, key: &AccessKey) -> std::result::Result<(), CodecError> {
        if self.grant.allowed == self.history.revoked_at.is_some() {
            return Err(CodecError::Inconsistent(format!(
                "grant flag for {key} disagrees with its history"
            )));
        }
        let expected = if self.grant.allowed {
            AccessAction::Granted
        } else {
            AccessAction::Revoked
        };
        match self.log.last() {
            Some(last) if last.action == expected => Ok(()),
            _ => Err(CodecError::Inconsistent(format!(
                "access log for {key} does not end with the current grant"
            ))),
        }
    }
}

impl TryFrom<Vec<AccessRecord>> for AccessState {
    type Error = CodecError;

    fn try_from(records: Vec<AccessRecord>) -> std::result::Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for r in records {
            let entry = AccessEntry {
                grant: r.grant,
                history: r.history,
                log: r.log,
            };
            entry.check(&r.key)?;
            if entries.insert(r.key.clone(), entry).is_some() {
                return Err(CodecError::Inconsistent(format!("access record {} appears twice", r.key)));
            }
        }
        Ok(Self { entries })
    }
}

impl From<AccessState> for Vec<AccessRecord> {
    fn from(state: AccessState) -> Self {
        state
            .entries
            .into_iter()
            .map(|(key, e)| AccessRecord {
                key,
                grant: e.grant,
                history: e.history,
                log: e.log,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: u64, verifier: &str) -> AccessKey {
        AccessKey::new(CredentialId::new(id), Address::new(verifier))
    }

    #[test]
    fn test_grant_then_revoke() {
        let mut state = AccessState::new();
        let k = key(1, "V1");

        state.apply_grant(k.clone(), Timestamp::new(100));
        assert!(state.is_allowed(&k));
        assert_eq!(state.history(&k), Some(AccessHistory::granted(Timestamp::new(100))));

        state.apply_revoke(&k, Timestamp::new(101)).unwrap();
        assert!(!state.is_allowed(&k));
        assert_eq!(state.grant(&k), Some(AccessGrant { allowed: false }));
        assert_eq!(
            state.history(&k),
            Some(AccessHistory {
                granted_at: Timestamp::new(100),
                revoked_at: Some(Timestamp::new(101)),
            })
        );
    }

    #[test]
    fn test_revoke_without_grant() {
        let mut state = AccessState::new();
        let k = key(1, "V1");

        let err = state.apply_revoke(&k, Timestamp::new(1)).unwrap_err();
        assert_eq!(err.code(), 206);
        assert!(!state.contains(&k));
        assert!(state.history(&k).is_none());
    }

    #[test]
    fn test_regrant_clears_revoke_but_log_keeps_everything() {
        let mut state = AccessState::new();
        let k = key(1, "V1");

        state.apply_grant(k.clone(), Timestamp::new(100));
        state.apply_revoke(&k, Timestamp::new(101)).unwrap();
        state.apply_grant(k.clone(), Timestamp::new(105));

        assert_eq!(state.history(&k), Some(AccessHistory::granted(Timestamp::new(105))));
        let actions: Vec<_> = state.log(&k).iter().map(|e| (e.action, e.at.get())).collect();
        assert_eq!(
            actions,
            vec![
                (AccessAction::Granted, 100),
                (AccessAction::Revoked, 101),
                (AccessAction::Granted, 105),
            ]
        );
    }

    #[test]
    fn test_allowed_verifiers() {
        let mut state = AccessState::new();
        state.apply_grant(key(1, "V2"), Timestamp::new(1));
        state.apply_grant(key(1, "V1"), Timestamp::new(1));
        state.apply_grant(key(2, "V3"), Timestamp::new(1));
        state.apply_grant(key(1, "V4"), Timestamp::new(1));
        state.apply_revoke(&key(1, "V4"), Timestamp::new(2)).unwrap();

        assert_eq!(
            state.allowed_verifiers(CredentialId::new(1)),
            vec![Address::new("V1"), Address::new("V2")]
        );
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_unknown_key_log_is_empty() {
        let state = AccessState::new();
        assert!(state.log(&key(1, "V1")).is_empty());
        assert!(state.is_empty());
    }

    fn records() -> Vec<AccessRecord> {
        let mut state = AccessState::new();
        state.apply_grant(key(1, "V1"), Timestamp::new(100));
        state.apply_grant(key(1, "V2"), Timestamp::new(100));
        state.apply_revoke(&key(1, "V2"), Timestamp::new(101)).unwrap();
        state.into()
    }

    #[test]
    fn test_records_rebuild_state() {
        let state = AccessState::try_from(records()).unwrap();
        assert!(state.check_consistency().is_ok());
        assert!(state.is_allowed(&key(1, "V1")));
        assert!(!state.is_allowed(&key(1, "V2")));
        assert_eq!(state.log(&key(1, "V2")).len(), 2);
    }

    #[test]
    fn test_duplicate_records_are_rejected() {
        let mut records = records();
        let first = records[0].clone();
        records.push(first);
        assert!(matches!(AccessState::try_from(records), Err(CodecError::Inconsistent(_))));
    }

    #[test]
    fn test_allowed_grant_with_revoke_is_rejected() {
        let mut records = records();
        let revoked = records.iter_mut().find(|r| r.key == key(1, "V2")).unwrap();
        revoked.grant = AccessGrant { allowed: true };
        assert!(matches!(AccessState::try_from(records), Err(CodecError::Inconsistent(_))));

        let mut records = self::records();
        records[0].log.clear();
        assert!(AccessState::try_from(records).is_err());
    }
}
