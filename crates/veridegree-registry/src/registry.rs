//! The credential registry machine.
//!
//! [`CredentialRegistry`] wraps [`RegistryState`] with admin gating, the
//! pause flag, ledger time, and an optional link to an access-control
//! ledger. Every public method runs under one lock acquisition, so each
//! call is a single atomic unit.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use veridegree_core::{
    validate_batch_size, validate_draft, validate_recipient, AccessLookup, Address, Clock,
    CodecError, Credential, CredentialDraft, CredentialId, CredentialLookup, DEFAULT_MAX_BATCH_SIZE,
};

use crate::batch::IssueBatch;
use crate::error::{RegistryError, Result};
use crate::state::RegistryState;

/// Configuration for a credential registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The only address allowed to issue, revoke, pause, and relink.
    pub admin: Address,

    /// Upper bound on elements per batch call.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

impl RegistryConfig {
    /// Create a config with the default batch bound.
    pub fn new(admin: impl Into<Address>) -> Self {
        Self {
            admin: admin.into(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Override the batch bound.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}

/// Serializable image of a registry, for the host to persist.
///
/// The access-control link is a live reference and is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub config: RegistryConfig,
    pub paused: bool,
    pub state: RegistryState,
}

/// Registry of uniquely owned, revocable credentials.
pub struct CredentialRegistry {
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
    inner: RwLock<RegistryInner>,
}

struct RegistryInner {
    paused: bool,
    state: RegistryState,
    /// Consulted only by `verify_with_access`.
    access_control: Option<Arc<dyn AccessLookup>>,
}

impl CredentialRegistry {
    /// Create an empty, unpaused registry.
    pub fn new(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            inner: RwLock::new(RegistryInner {
                paused: false,
                state: RegistryState::new(),
                access_control: None,
            }),
        }
    }

    /// Rebuild a registry from a snapshot. No access control is linked.
    ///
    /// Fails if the snapshot's state breaks the id or ownership invariants.
    pub fn from_snapshot(
        snapshot: RegistrySnapshot,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, CodecError> {
        if let Err(e) = snapshot.state.check_consistency() {
            warn!(error = %e, "registry snapshot rejected");
            return Err(e);
        }

        Ok(Self {
            config: snapshot.config,
            clock,
            inner: RwLock::new(RegistryInner {
                paused: snapshot.paused,
                state: snapshot.state,
                access_control: None,
            }),
        })
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.read();
        RegistrySnapshot {
            config: self.config.clone(),
            paused: inner.paused,
            state: inner.state.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the pause flag. Returns the new value.
    pub fn set_paused(&self, caller: &Address, pause: bool) -> Result<bool> {
        self.ensure_admin(caller)?;
        self.write().paused = pause;
        info!(paused = pause, "registry pause flag set");
        Ok(pause)
    }

    /// Replace the access-control reference. `None` unlinks it.
    pub fn set_access_control(
        &self,
        caller: &Address,
        access_control: Option<Arc<dyn AccessLookup>>,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let linked = access_control.is_some();
        self.write().access_control = access_control;
        info!(linked, "registry access control replaced");
        Ok(())
    }

    /// Issue one credential to `draft.recipient`.
    pub fn issue(&self, caller: &Address, draft: CredentialDraft) -> Result<CredentialId> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        self.ensure_admin(caller)?;
        validate_draft(&draft)?;

        let recipient = draft.recipient.clone();
        let id = inner.state.apply_issue(draft, self.clock.now());
        info!(credential_id = %id, owner = %recipient, "credential issued");
        Ok(id)
    }

    /// Issue several credentials with consecutive ids, all or nothing.
    pub fn issue_batch(
        &self,
        caller: &Address,
        drafts: Vec<CredentialDraft>,
    ) -> Result<Vec<CredentialId>> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        self.ensure_admin(caller)?;
        validate_batch_size(drafts.len(), self.config.max_batch_size)?;

        self.apply_batch(&mut inner, drafts)
    }

    /// Issue from five parallel lists, all or nothing.
    ///
    /// The size bound is checked against the recipient list before the list
    /// lengths are compared.
    pub fn issue_batch_columns(
        &self,
        caller: &Address,
        batch: IssueBatch,
    ) -> Result<Vec<CredentialId>> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        self.ensure_admin(caller)?;
        validate_batch_size(batch.len(), self.config.max_batch_size)?;
        let drafts = batch.into_drafts()?;

        self.apply_batch(&mut inner, drafts)
    }

    /// Revoke a credential. Revoking an already revoked credential succeeds.
    pub fn revoke(&self, caller: &Address, id: CredentialId) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        self.ensure_admin(caller)?;

        inner.state.apply_revoke(id)?;
        info!(credential_id = %id, "credential revoked");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Owner Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Move a credential from its current owner (the caller) to `recipient`.
    pub fn transfer(&self, caller: &Address, id: CredentialId, recipient: Address) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;

        let owner = inner
            .state
            .owner(id)
            .ok_or(RegistryError::CredentialNotFound(id))?;
        if owner != caller {
            warn!(credential_id = %id, caller = %caller, "transfer by non-owner rejected");
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }
        validate_recipient(&recipient)?;
        if inner.state.credential(id).is_some_and(|c| c.revoked) {
            return Err(RegistryError::CredentialRevoked(id));
        }

        inner.state.apply_transfer(id, recipient.clone())?;
        info!(credential_id = %id, from = %caller, to = %recipient, "credential transferred");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Return the credential if it exists and is not revoked.
    ///
    /// Anyone may verify; the caller is only recorded in logs.
    pub fn verify(&self, caller: &Address, id: CredentialId) -> Result<Credential> {
        let inner = self.read();
        let credential = checked_valid(&inner.state, id)?;
        debug!(credential_id = %id, caller = %caller, "credential verified");
        Ok(credential.clone())
    }

    /// Like [`verify`](Self::verify), but when an access-control ledger is
    /// linked the caller must be the owner or an allowed verifier.
    pub fn verify_with_access(&self, caller: &Address, id: CredentialId) -> Result<Credential> {
        let (credential, owner, access_control) = {
            let inner = self.read();
            let credential = checked_valid(&inner.state, id)?.clone();
            let owner = inner.state.owner(id).cloned();
            (credential, owner, inner.access_control.clone())
        };

        if let Some(access_control) = access_control {
            let is_owner = owner.as_ref() == Some(caller);
            if !is_owner && !access_control.is_allowed(id, caller) {
                warn!(credential_id = %id, caller = %caller, "verification without access rejected");
                return Err(RegistryError::NotAuthorized(caller.clone()));
            }
        }

        debug!(credential_id = %id, caller = %caller, "credential verified with access check");
        Ok(credential)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a credential, revoked or not.
    pub fn get_credential(&self, id: CredentialId) -> Option<Credential> {
        self.read().state.credential(id).cloned()
    }

    /// Get the current owner of a credential.
    pub fn get_owner(&self, id: CredentialId) -> Option<Address> {
        self.read().state.owner(id).cloned()
    }

    /// Number of credentials ever issued.
    pub fn total_credentials(&self) -> u64 {
        self.read().state.total_credentials()
    }

    /// Highest id assigned so far (0 before the first issuance).
    pub fn last_credential_id(&self) -> u64 {
        self.read().state.last_credential_id()
    }

    /// Ids currently owned by `owner`, ascending.
    pub fn credentials_owned_by(&self, owner: &Address) -> Vec<CredentialId> {
        self.read().state.owned_by(owner)
    }

    /// Whether mutations are currently blocked.
    pub fn is_paused(&self) -> bool {
        self.read().paused
    }

    /// Whether an access-control ledger is linked.
    pub fn has_access_control(&self) -> bool {
        self.read().access_control.is_some()
    }

    /// The admin address.
    pub fn admin(&self) -> &Address {
        &self.config.admin
    }

    /// The batch bound.
    pub fn max_batch_size(&self) -> usize {
        self.config.max_batch_size
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_batch(
        &self,
        inner: &mut RegistryInner,
        drafts: Vec<CredentialDraft>,
    ) -> Result<Vec<CredentialId>> {
        // Nothing is written until every element has passed.
        for (index, draft) in drafts.iter().enumerate() {
            if let Err(e) = validate_draft(draft) {
                warn!(index, error = %e, "credential batch rejected");
                return Err(e.into());
            }
        }

        let now = self.clock.now();
        let ids: Vec<CredentialId> = drafts
            .into_iter()
            .map(|draft| inner.state.apply_issue(draft, now))
            .collect();

        info!(count = ids.len(), first = ?ids.first(), "credential batch issued");
        Ok(ids)
    }

    fn ensure_admin(&self, caller: &Address) -> Result<()> {
        if caller != &self.config.admin {
            warn!(caller = %caller, "non-admin call rejected");
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_live(inner: &RegistryInner) -> Result<()> {
    if inner.paused {
        return Err(RegistryError::ContractPaused);
    }
    Ok(())
}

fn checked_valid(state: &RegistryState, id: CredentialId) -> Result<&Credential> {
    let credential = state
        .credential(id)
        .ok_or(RegistryError::CredentialNotFound(id))?;
    if credential.revoked {
        return Err(RegistryError::CredentialRevoked(id));
    }
    Ok(credential)
}

impl CredentialLookup for CredentialRegistry {
    fn owner_of(&self, id: CredentialId) -> Option<Address> {
        self.get_owner(id)
    }

    fn credential(&self, id: CredentialId) -> Option<Credential> {
        self.get_credential(id)
    }

    fn total_credentials(&self) -> u64 {
        CredentialRegistry::total_credentials(self)
    }
}

impl fmt::Debug for CredentialRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("CredentialRegistry")
            .field("admin", &self.config.admin)
            .field("paused", &inner.paused)
            .field("total_credentials", &inner.state.total_credentials())
            .field("access_control", &inner.access_control.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use veridegree_core::{ErrorKind, ManualClock, Timestamp};

    const ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const USER1: &str = "ST2CY5V39N7V71J3X4H8E3T63Z84Y5P3W6Z8G3";
    const USER2: &str = "ST3NBRSFKX28F3V56Z1XJ3X4H8E3T63Z84Y5P3W6Z8G3";

    fn admin() -> Address {
        Address::new(ADMIN)
    }

    fn user1() -> Address {
        Address::new(USER1)
    }

    fn user2() -> Address {
        Address::new(USER2)
    }

    fn registry() -> CredentialRegistry {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        CredentialRegistry::new(RegistryConfig::new(ADMIN), Arc::new(ManualClock::new(100)))
    }

    fn diploma(recipient: &str) -> CredentialDraft {
        CredentialDraft::new(
            recipient,
            "Diploma",
            "University XYZ",
            "John Doe",
            "ipfs://metadata123",
        )
    }

    fn certificate(recipient: &str) -> CredentialDraft {
        CredentialDraft::new(
            recipient,
            "Certificate",
            "Institute ABC",
            "Jane Smith",
            "ipfs://metadata456",
        )
    }

    /// Access lookup that allows a fixed set of verifiers.
    struct AllowList(HashSet<Address>);

    impl AccessLookup for AllowList {
        fn is_allowed(&self, _id: CredentialId, verifier: &Address) -> bool {
            self.0.contains(verifier)
        }
    }

    #[test]
    fn test_issue_single_credential() {
        let registry = registry();

        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        assert_eq!(id, CredentialId::new(1));

        let credential = registry.get_credential(id).unwrap();
        assert_eq!(credential.credential_type, "Diploma");
        assert_eq!(credential.issuer, "University XYZ");
        assert_eq!(credential.recipient_name, "John Doe");
        assert_eq!(credential.issue_date, Timestamp::new(100));
        assert!(!credential.revoked);
        assert_eq!(credential.metadata_uri, "ipfs://metadata123");

        assert_eq!(registry.get_owner(id), Some(user1()));
        assert_eq!(registry.total_credentials(), 1);
    }

    #[test]
    fn test_unissued_ids_are_absent() {
        let registry = registry();
        assert!(registry.get_credential(CredentialId::new(1)).is_none());
        assert!(registry.get_owner(CredentialId::new(1)).is_none());
        assert_eq!(registry.total_credentials(), 0);
        assert_eq!(registry.last_credential_id(), 0);
    }

    #[test]
    fn test_non_admin_cannot_issue() {
        let registry = registry();
        let err = registry.issue(&user1(), diploma(USER2)).unwrap_err();
        assert_eq!(err, RegistryError::NotAuthorized(user1()));
        assert_eq!(err.code(), 100);
    }

    #[test]
    fn test_cannot_issue_to_null_address() {
        let registry = registry();
        let draft = diploma(veridegree_core::NULL_ADDRESS);
        let err = registry.issue(&admin(), draft).unwrap_err();
        assert_eq!(err, RegistryError::InvalidRecipient);
        assert_eq!(err.code(), 104);
    }

    #[test]
    fn test_cannot_issue_with_empty_metadata() {
        let registry = registry();
        let mut draft = diploma(USER1);
        draft.credential_type.clear();

        let err = registry.issue(&admin(), draft).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMetadata);
        assert_eq!(err.code(), 105);
        assert_eq!(registry.total_credentials(), 0);
    }

    #[test]
    fn test_pause_blocks_mutations_before_auth() {
        let registry = registry();
        registry.issue(&admin(), diploma(USER1)).unwrap();

        assert_eq!(registry.set_paused(&admin(), true), Ok(true));
        assert!(registry.is_paused());

        // Paused is reported even to non-admins.
        assert_eq!(
            registry.issue(&user1(), diploma(USER1)),
            Err(RegistryError::ContractPaused)
        );
        assert_eq!(
            registry.revoke(&admin(), CredentialId::new(1)),
            Err(RegistryError::ContractPaused)
        );
        assert_eq!(
            registry.transfer(&user1(), CredentialId::new(1), user2()),
            Err(RegistryError::ContractPaused)
        );

        // Reads still work.
        assert!(registry.verify(&user2(), CredentialId::new(1)).is_ok());

        assert_eq!(registry.set_paused(&admin(), false), Ok(false));
        assert!(registry.issue(&admin(), diploma(USER2)).is_ok());
    }

    #[test]
    fn test_non_admin_cannot_pause() {
        let registry = registry();
        assert_eq!(
            registry.set_paused(&user1(), true),
            Err(RegistryError::NotAuthorized(user1()))
        );
        assert!(!registry.is_paused());
    }

    #[test]
    fn test_issue_batch() {
        let registry = registry();
        let ids = registry
            .issue_batch(&admin(), vec![diploma(USER1), certificate(USER2)])
            .unwrap();

        assert_eq!(ids, vec![CredentialId::new(1), CredentialId::new(2)]);
        assert_eq!(registry.get_credential(ids[1]).unwrap().issuer, "Institute ABC");
        assert_eq!(registry.get_owner(ids[0]), Some(user1()));
        assert_eq!(registry.get_owner(ids[1]), Some(user2()));
        assert_eq!(registry.total_credentials(), 2);
    }

    #[test]
    fn test_issue_batch_columns_mismatched_lengths() {
        let registry = registry();
        let batch = IssueBatch {
            recipients: vec![user1(), user2()],
            credential_types: vec!["Diploma".into()],
            issuers: vec!["University XYZ".into()],
            recipient_names: vec!["John Doe".into()],
            metadata_uris: vec!["ipfs://metadata123".into()],
        };

        let err = registry.issue_batch_columns(&admin(), batch).unwrap_err();
        assert_eq!(err.code(), 105);
    }

    #[test]
    fn test_issue_batch_exceeding_max() {
        let registry = registry();
        let drafts = vec![diploma(USER1); 11];

        let err = registry.issue_batch(&admin(), drafts).unwrap_err();
        assert_eq!(err, RegistryError::BatchSizeExceeded { len: 11, max: 10 });
        assert_eq!(err.code(), 106);
        assert_eq!(registry.total_credentials(), 0);
    }

    #[test]
    fn test_issue_batch_columns_exceeding_max() {
        let registry = registry();
        registry.issue(&admin(), diploma(USER1)).unwrap();
        let before = registry.snapshot();

        // Size is checked against the recipient list, before list lengths.
        let batch = IssueBatch {
            recipients: vec![user2(); 11],
            credential_types: vec!["Diploma".into(); 11],
            issuers: vec!["University XYZ".into(); 11],
            recipient_names: vec!["Jane Smith".into(); 3],
            metadata_uris: vec!["ipfs://metadata123".into(); 11],
        };

        let err = registry.issue_batch_columns(&admin(), batch).unwrap_err();
        assert_eq!(err, RegistryError::BatchSizeExceeded { len: 11, max: 10 });
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_issue_batch_is_all_or_nothing() {
        let registry = registry();
        registry.issue(&admin(), diploma(USER1)).unwrap();

        let mut bad = certificate(USER2);
        bad.recipient = Address::null();
        let err = registry
            .issue_batch(&admin(), vec![diploma(USER1), diploma(USER2), bad])
            .unwrap_err();

        assert_eq!(err, RegistryError::InvalidRecipient);
        assert_eq!(registry.total_credentials(), 1);
        assert_eq!(registry.last_credential_id(), 1);
        assert!(registry.get_credential(CredentialId::new(2)).is_none());

        // The next successful issuance picks up right after the last good one.
        assert_eq!(
            registry.issue(&admin(), diploma(USER2)),
            Ok(CredentialId::new(2))
        );
    }

    #[test]
    fn test_revoke() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();

        registry.revoke(&admin(), id).unwrap();
        assert!(registry.get_credential(id).unwrap().revoked);

        // Idempotent.
        registry.revoke(&admin(), id).unwrap();
        assert!(registry.get_credential(id).unwrap().revoked);
        assert_eq!(registry.get_owner(id), Some(user1()));
    }

    #[test]
    fn test_non_admin_cannot_revoke() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        assert_eq!(
            registry.revoke(&user2(), id),
            Err(RegistryError::NotAuthorized(user2()))
        );
    }

    #[test]
    fn test_revoke_missing() {
        let registry = registry();
        let err = registry.revoke(&admin(), CredentialId::new(1)).unwrap_err();
        assert_eq!(err.code(), 103);
    }

    #[test]
    fn test_transfer() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();

        registry.transfer(&user1(), id, user2()).unwrap();
        assert_eq!(registry.get_owner(id), Some(user2()));
        assert_eq!(registry.credentials_owned_by(&user2()), vec![id]);
        assert!(registry.credentials_owned_by(&user1()).is_empty());
    }

    #[test]
    fn test_transfer_by_non_owner() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        assert_eq!(
            registry.transfer(&user2(), id, user2()),
            Err(RegistryError::NotAuthorized(user2()))
        );
        // Even the admin is not the owner.
        assert_eq!(
            registry.transfer(&admin(), id, user2()),
            Err(RegistryError::NotAuthorized(admin()))
        );
    }

    #[test]
    fn test_transfer_to_null_address() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        assert_eq!(
            registry.transfer(&user1(), id, Address::null()),
            Err(RegistryError::InvalidRecipient)
        );
    }

    #[test]
    fn test_transfer_revoked() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        registry.revoke(&admin(), id).unwrap();

        let err = registry.transfer(&user1(), id, user2()).unwrap_err();
        assert_eq!(err, RegistryError::CredentialRevoked(id));
        assert_eq!(err.code(), 102);
    }

    #[test]
    fn test_verify() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();

        let credential = registry.verify(&user2(), id).unwrap();
        assert_eq!(credential, registry.get_credential(id).unwrap());
    }

    #[test]
    fn test_verify_revoked_and_missing() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        registry.revoke(&admin(), id).unwrap();

        assert_eq!(
            registry.verify(&user2(), id),
            Err(RegistryError::CredentialRevoked(id))
        );
        assert_eq!(
            registry.verify(&user2(), CredentialId::new(2)),
            Err(RegistryError::CredentialNotFound(CredentialId::new(2)))
        );
    }

    #[test]
    fn test_verify_with_access() {
        let registry = registry();
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        let outsider = Address::new("ST4J8K9M2N3V5P7Q6R8S9T0U1V2W3X4Y5Z6A7B8C9");

        // Unlinked: same as verify.
        assert!(registry.verify_with_access(&outsider, id).is_ok());

        let allow: Arc<dyn AccessLookup> = Arc::new(AllowList([user2()].into_iter().collect()));
        registry.set_access_control(&admin(), Some(allow)).unwrap();
        assert!(registry.has_access_control());

        assert!(registry.verify_with_access(&user1(), id).is_ok());
        assert!(registry.verify_with_access(&user2(), id).is_ok());
        assert_eq!(
            registry.verify_with_access(&outsider, id),
            Err(RegistryError::NotAuthorized(outsider.clone()))
        );

        registry.set_access_control(&admin(), None).unwrap();
        assert!(registry.verify_with_access(&outsider, id).is_ok());
    }

    #[test]
    fn test_non_admin_cannot_link_access_control() {
        let registry = registry();
        let allow: Arc<dyn AccessLookup> = Arc::new(AllowList(HashSet::new()));
        assert_eq!(
            registry.set_access_control(&user1(), Some(allow)),
            Err(RegistryError::NotAuthorized(user1()))
        );
        assert!(!registry.has_access_control());
    }

    #[test]
    fn test_total_counts_revoked() {
        let registry = registry();
        registry.issue(&admin(), diploma(USER1)).unwrap();
        registry.issue(&admin(), certificate(USER2)).unwrap();
        registry.revoke(&admin(), CredentialId::new(1)).unwrap();
        assert_eq!(registry.total_credentials(), 2);
    }

    #[test]
    fn test_snapshot_restores_state() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(100));
        let registry = CredentialRegistry::new(RegistryConfig::new(ADMIN), clock.clone());
        registry.issue(&admin(), diploma(USER1)).unwrap();
        registry.set_paused(&admin(), true).unwrap();

        let restored = CredentialRegistry::from_snapshot(registry.snapshot(), clock).unwrap();
        assert!(restored.is_paused());
        assert_eq!(restored.total_credentials(), 1);
        assert_eq!(restored.get_owner(CredentialId::new(1)), Some(user1()));
        assert!(!restored.has_access_control());
    }

    #[test]
    fn test_snapshot_with_rolled_back_counter_is_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(100));
        let registry = CredentialRegistry::new(RegistryConfig::new(ADMIN), clock.clone());
        let id = registry.issue(&admin(), diploma(USER1)).unwrap();
        registry.revoke(&admin(), id).unwrap();

        // Rewind the counters so the next issue would land on id 1 again.
        let mut value = serde_json::to_value(registry.snapshot()).unwrap();
        value["state"]["last_credential_id"] = 0.into();
        value["state"]["total_credentials"] = 0.into();
        let tampered: RegistrySnapshot = serde_json::from_value(value).unwrap();

        let err = CredentialRegistry::from_snapshot(tampered, clock.clone()).unwrap_err();
        assert!(matches!(err, CodecError::Inconsistent(_)));
    }

    #[test]
    fn test_snapshot_with_orphaned_owner_is_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(100));
        let registry = CredentialRegistry::new(RegistryConfig::new(ADMIN), clock.clone());
        registry.issue(&admin(), diploma(USER1)).unwrap();

        let mut value = serde_json::to_value(registry.snapshot()).unwrap();
        value["state"]["owners"]["2"] = USER2.into();
        let tampered: RegistrySnapshot = serde_json::from_value(value).unwrap();

        assert!(CredentialRegistry::from_snapshot(tampered, clock).is_err());
    }

    proptest! {
        #[test]
        fn prop_oversized_batch_writes_nothing(len in 11usize..20, seeded in 0usize..3) {
            let registry = registry();
            for _ in 0..seeded {
                registry.issue(&admin(), diploma(USER1)).unwrap();
            }
            let before = registry.snapshot();

            let drafts = vec![diploma(USER2); len];
            prop_assert_eq!(
                registry.issue_batch(&admin(), drafts),
                Err(RegistryError::BatchSizeExceeded { len, max: 10 })
            );
            prop_assert_eq!(registry.snapshot(), before);
        }

        #[test]
        fn prop_transfer_keeps_single_owner(hops in proptest::collection::vec(0usize..3, 1..8)) {
            let registry = registry();
            let id = registry.issue(&admin(), diploma(USER1)).unwrap();
            let holders = [user1(), user2(), admin()];

            let mut owner = user1();
            for hop in hops {
                let next = holders[hop].clone();
                registry.transfer(&owner, id, next.clone()).unwrap();
                owner = next;
            }

            prop_assert_eq!(registry.get_owner(id), Some(owner.clone()));
            let owned: usize = holders.iter().map(|h| registry.credentials_owned_by(h).len()).sum();
            prop_assert_eq!(owned, 1);
            prop_assert_eq!(registry.credentials_owned_by(&owner), vec![id]);
        }
    }
}
