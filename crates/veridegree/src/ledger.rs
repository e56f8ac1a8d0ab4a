//! The Ledger: one credential registry, access-control ledger, and
//! verification registry over a shared clock.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use veridegree_access::{AccessConfig, AccessControlLedger, AccessSnapshot};
use veridegree_core::{
    from_cbor, to_cbor, AccessLookup, Address, Clock, DEFAULT_MAX_BATCH_SIZE,
};
use veridegree_registry::{CredentialRegistry, RegistryConfig, RegistrySnapshot};
use veridegree_verify::{VerificationRegistry, VerificationSnapshot};

use crate::error::Result;

/// Configuration for a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Admin of both the registry and the access-control ledger.
    pub admin: Address,

    /// Upper bound on elements per batch call, for every machine.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Whether the registry consults the access ledger in `verify_with_access`.
    #[serde(default = "default_link_access_control")]
    pub link_access_control: bool,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

fn default_link_access_control() -> bool {
    true
}

impl LedgerConfig {
    /// Create a config with default batch bound and access control linked.
    pub fn new(admin: impl Into<Address>) -> Self {
        Self {
            admin: admin.into(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            link_access_control: true,
        }
    }

    /// Parse a JSON config document. Missing optional fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn with_link_access_control(mut self, link: bool) -> Self {
        self.link_access_control = link;
        self
    }

    fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::new(self.admin.clone()).with_max_batch_size(self.max_batch_size)
    }

    fn access_config(&self) -> AccessConfig {
        AccessConfig::new(self.admin.clone()).with_max_batch_size(self.max_batch_size)
    }
}

/// The whole ledger's state, for the host to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub config: LedgerConfig,
    pub registry: RegistrySnapshot,
    pub access: AccessSnapshot,
    pub verification: VerificationSnapshot,
}

impl LedgerSnapshot {
    /// Encode as CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(to_cbor(self)?)
    }

    /// Decode from CBOR.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(from_cbor(bytes)?)
    }
}

/// The three ledger machines, wired together.
///
/// The access ledger and the verification registry hold the registry as a
/// [`CredentialLookup`](veridegree_core::CredentialLookup); the registry
/// optionally holds the access ledger as an [`AccessLookup`]. Each machine
/// is reachable directly for its own operations.
pub struct Ledger {
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    registry: Arc<CredentialRegistry>,
    access: Arc<AccessControlLedger>,
    verification: VerificationRegistry,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(config: LedgerConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let registry = Arc::new(CredentialRegistry::new(config.registry_config(), clock.clone()));
        let access = Arc::new(AccessControlLedger::new(
            config.access_config(),
            registry.clone(),
            clock.clone(),
        ));
        let verification = VerificationRegistry::new(registry.clone(), clock.clone());

        let ledger = Self {
            config,
            clock,
            registry,
            access,
            verification,
        };
        ledger.link()?;
        info!(admin = %ledger.config.admin, "ledger created");
        Ok(ledger)
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// A snapshot whose counters, owners, or access records disagree with
    /// each other is refused with [`LedgerError::Codec`](crate::error::LedgerError::Codec).
    pub fn from_snapshot(snapshot: LedgerSnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        let registry = Arc::new(CredentialRegistry::from_snapshot(snapshot.registry, clock.clone())?);
        let access = Arc::new(AccessControlLedger::from_snapshot(
            snapshot.access,
            registry.clone(),
            clock.clone(),
        )?);
        let verification =
            VerificationRegistry::from_snapshot(snapshot.verification, registry.clone(), clock.clone())?;

        let ledger = Self {
            config: snapshot.config,
            clock,
            registry,
            access,
            verification,
        };
        ledger.link()?;
        info!(
            total_credentials = ledger.registry.total_credentials(),
            requests = ledger.verification.request_count(),
            "ledger restored"
        );
        Ok(ledger)
    }

    /// Capture the state of every machine.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            config: self.config.clone(),
            registry: self.registry.snapshot(),
            access: self.access.snapshot(),
            verification: self.verification.snapshot(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The credential registry.
    pub fn registry(&self) -> &Arc<CredentialRegistry> {
        &self.registry
    }

    /// The access-control ledger.
    pub fn access(&self) -> &Arc<AccessControlLedger> {
        &self.access
    }

    /// The verification registry.
    pub fn verification(&self) -> &VerificationRegistry {
        &self.verification
    }

    fn link(&self) -> Result<()> {
        if self.config.link_access_control {
            let lookup: Arc<dyn AccessLookup> = self.access.clone();
            self.registry
                .set_access_control(self.registry.admin(), Some(lookup))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("registry", &self.registry)
            .field("access", &self.access)
            .field("verification", &self.verification)
            .finish()
    }
}
