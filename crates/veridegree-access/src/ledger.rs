//! The access-control ledger machine.
//!
//! [`AccessControlLedger`] wraps [`AccessState`] with owner gating against
//! a live [`CredentialLookup`], the pause flag, admin reconfiguration, and
//! ledger time. Every public method runs under one lock acquisition.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use veridegree_core::{
    validate_batch_size, validate_recipient, AccessLookup, Address, Clock, CodecError,
    CredentialId, CredentialLookup, DEFAULT_MAX_BATCH_SIZE,
};

use crate::error::{AccessError, Result};
use crate::grant::{AccessEvent, AccessHistory, AccessKey};
use crate::state::AccessState;

/// Configuration for an access-control ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// The only address allowed to pause and relink the registry.
    pub admin: Address,

    /// Upper bound on verifiers per batch call.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

impl AccessConfig {
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

/// Serializable image of the ledger. The registry link is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSnapshot {
    pub config: AccessConfig,
    pub paused: bool,
    pub state: AccessState,
}

/// Owner-controlled verifier access to credentials.
pub struct AccessControlLedger {
    config: AccessConfig,
    clock: Arc<dyn Clock>,
    inner: RwLock<AccessInner>,
}

struct AccessInner {
    paused: bool,
    registry: Arc<dyn CredentialLookup>,
    state: AccessState,
}

impl AccessControlLedger {
    /// Create an empty, unpaused ledger backed by `registry`.
    pub fn new(
        config: AccessConfig,
        registry: Arc<dyn CredentialLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            clock,
            inner: RwLock::new(AccessInner {
                paused: false,
                registry,
                state: AccessState::new(),
            }),
        }
    }

    /// Rebuild a ledger from a snapshot, backed by `registry`.
    pub fn from_snapshot(
        snapshot: AccessSnapshot,
        registry: Arc<dyn CredentialLookup>,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, CodecError> {
        if let Err(e) = snapshot.state.check_consistency() {
            warn!(error = %e, "access snapshot rejected");
            return Err(e);
        }
        Ok(Self {
            config: snapshot.config,
            clock,
            inner: RwLock::new(AccessInner {
                paused: snapshot.paused,
                registry,
                state: snapshot.state,
            }),
        })
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> AccessSnapshot {
        let inner = self.read();
        AccessSnapshot {
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
        info!(paused = pause, "access control pause flag set");
        Ok(pause)
    }

    /// Point the ledger at a different credential registry.
    ///
    /// A registry that has never issued a credential is taken to be
    /// uninitialized and rejected.
    pub fn set_registry(&self, caller: &Address, registry: Arc<dyn CredentialLookup>) -> Result<()> {
        self.ensure_admin(caller)?;
        if registry.total_credentials() == 0 {
            warn!("rejected empty credential registry");
            return Err(AccessError::InvalidAccessContract(
                "registry has no credentials".to_string(),
            ));
        }

        self.write().registry = registry;
        info!("access control registry replaced");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Owner Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Allow `verifier` to see credential `id`.
    pub fn grant(&self, caller: &Address, id: CredentialId, verifier: Address) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        ensure_owner(&inner, caller, id)?;
        validate_recipient(&verifier).map_err(|_| AccessError::InvalidRecipient)?;

        inner
            .state
            .apply_grant(AccessKey::new(id, verifier.clone()), self.clock.now());
        info!(credential_id = %id, verifier = %verifier, "access granted");
        Ok(())
    }

    /// Withdraw access previously granted to `verifier`.
    pub fn revoke(&self, caller: &Address, id: CredentialId, verifier: Address) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        ensure_owner(&inner, caller, id)?;

        inner
            .state
            .apply_revoke(&AccessKey::new(id, verifier.clone()), self.clock.now())?;
        info!(credential_id = %id, verifier = %verifier, "access revoked");
        Ok(())
    }

    /// Grant several verifiers at once, all or nothing.
    pub fn grant_batch(&self, caller: &Address, id: CredentialId, verifiers: &[Address]) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        ensure_owner(&inner, caller, id)?;
        check_batch_size(verifiers.len(), self.config.max_batch_size)?;

        for (index, verifier) in verifiers.iter().enumerate() {
            if validate_recipient(verifier).is_err() {
                warn!(credential_id = %id, index, "access grant batch rejected");
                return Err(AccessError::InvalidRecipient);
            }
        }

        let now = self.clock.now();
        for verifier in verifiers {
            inner.state.apply_grant(AccessKey::new(id, verifier.clone()), now);
        }
        info!(credential_id = %id, count = verifiers.len(), "access granted in batch");
        Ok(())
    }

    /// Revoke several verifiers at once, all or nothing.
    pub fn revoke_batch(
        &self,
        caller: &Address,
        id: CredentialId,
        verifiers: &[Address],
    ) -> Result<()> {
        let mut inner = self.write();
        ensure_live(&inner)?;
        ensure_owner(&inner, caller, id)?;
        check_batch_size(verifiers.len(), self.config.max_batch_size)?;

        let keys: Vec<AccessKey> = verifiers
            .iter()
            .map(|v| AccessKey::new(id, v.clone()))
            .collect();
        if let Some((index, key)) = keys.iter().enumerate().find(|(_, k)| !inner.state.contains(k)) {
            warn!(credential_id = %id, index, "access revoke batch rejected");
            return Err(AccessError::AccessNotFound {
                credential_id: id,
                verifier: key.verifier.clone(),
            });
        }

        let now = self.clock.now();
        for key in &keys {
            inner.state.apply_revoke(key, now)?;
        }
        info!(credential_id = %id, count = keys.len(), "access revoked in batch");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `verifier` may currently see credential `id`.
    ///
    /// Fails if the registry has no such credential; `false` if never granted.
    pub fn has_access(&self, id: CredentialId, verifier: &Address) -> Result<bool> {
        let inner = self.read();
        if inner.registry.owner_of(id).is_none() {
            return Err(AccessError::CredentialNotFound(id));
        }
        let allowed = inner.state.is_allowed(&AccessKey::new(id, verifier.clone()));
        debug!(credential_id = %id, verifier = %verifier, allowed, "access checked");
        Ok(allowed)
    }

    /// Latest grant/revoke pair. `None` if never granted; no registry check.
    pub fn get_access_history(&self, id: CredentialId, verifier: &Address) -> Option<AccessHistory> {
        self.read()
            .state
            .history(&AccessKey::new(id, verifier.clone()))
    }

    /// Every grant and revoke for the pair, oldest first.
    pub fn access_log(&self, id: CredentialId, verifier: &Address) -> Vec<AccessEvent> {
        self.read()
            .state
            .log(&AccessKey::new(id, verifier.clone()))
            .to_vec()
    }

    /// Verifiers currently allowed on credential `id`, sorted.
    pub fn verifiers_of(&self, id: CredentialId) -> Vec<Address> {
        self.read().state.allowed_verifiers(id)
    }

    /// Whether mutations are currently blocked.
    pub fn is_paused(&self) -> bool {
        self.read().paused
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

    fn ensure_admin(&self, caller: &Address) -> Result<()> {
        if caller != &self.config.admin {
            warn!(caller = %caller, "non-admin call rejected");
            return Err(AccessError::NotAuthorized(caller.clone()));
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, AccessInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AccessInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_live(inner: &AccessInner) -> Result<()> {
    if inner.paused {
        return Err(AccessError::ContractPaused);
    }
    Ok(())
}

/// The caller must be the credential's owner as the registry reports it now.
fn ensure_owner(inner: &AccessInner, caller: &Address, id: CredentialId) -> Result<()> {
    let owner = inner
        .registry
        .owner_of(id)
        .ok_or(AccessError::CredentialNotFound(id))?;
    if &owner != caller {
        warn!(credential_id = %id, caller = %caller, "access change by non-owner rejected");
        return Err(AccessError::NotAuthorized(caller.clone()));
    }
    Ok(())
}

impl AccessLookup for AccessControlLedger {
    fn is_allowed(&self, id: CredentialId, verifier: &Address) -> bool {
        self.read()
            .state
            .is_allowed(&AccessKey::new(id, verifier.clone()))
    }
}

fn check_batch_size(len: usize, max: usize) -> Result<()> {
    validate_batch_size(len, max).map_err(|_| AccessError::BatchSizeExceeded { len, max })
}

impl fmt::Debug for AccessControlLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("AccessControlLedger")
            .field("admin", &self.config.admin)
            .field("paused", &inner.paused)
            .field("records", &inner.state.len())
            .finish()
    }
}
