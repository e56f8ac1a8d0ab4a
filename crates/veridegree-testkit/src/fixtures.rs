//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use veridegree::{Ledger, LedgerConfig};
use veridegree_core::{Address, CredentialDraft, CredentialId, ManualClock, NULL_ADDRESS};

pub const ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
pub const USER1: &str = "ST2CY5V39N7V71J3X4H8E3T63Z84Y5P3W6Z8G3";
pub const USER2: &str = "ST3NBRSFKX28F3V56Z1XJ3X4H8E3T63Z84Y5P3W6Z8G3";
pub const VERIFIER: &str = USER2;
pub const VERIFIER2: &str = "ST4J8K9M2N3V5P7Q6R8S9T0U1V2W3X4Y5Z6A7B8C9";
pub const ZERO_ADDRESS: &str = NULL_ADDRESS;

/// Ledger time every fixture starts at.
pub const START_TIME: u64 = 100;

/// A wired ledger administered by [`ADMIN`], on a manual clock.
pub struct TestFixture {
    pub clock: Arc<ManualClock>,
    pub ledger: Ledger,
}

impl TestFixture {
    /// Create a fixture with the default ledger config.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::new(ADMIN))
    }

    /// Create a fixture with a custom config.
    ///
    /// # Panics
    ///
    /// Panics if the config's admin cannot link access control, which only
    /// happens for a hand-built inconsistent config.
    pub fn with_config(config: LedgerConfig) -> Self {
        let clock = Arc::new(ManualClock::new(START_TIME));
        let ledger = Ledger::new(config, clock.clone()).expect("fixture ledger");
        Self { clock, ledger }
    }

    pub fn admin(&self) -> Address {
        self.ledger.config().admin.clone()
    }

    /// Issue a diploma to `owner` as the admin.
    ///
    /// # Panics
    ///
    /// Panics if the registry rejects the issue (paused, or `owner` is null).
    pub fn issue_diploma(&self, owner: &str, recipient_name: &str) -> CredentialId {
        self.ledger
            .registry()
            .issue(&self.admin(), diploma(owner, recipient_name))
            .expect("fixture issue")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid draft with the field values the ledger's own tests use.
pub fn diploma(recipient: &str, recipient_name: &str) -> CredentialDraft {
    CredentialDraft::new(
        recipient,
        "Diploma",
        "University XYZ",
        recipient_name,
        "ipfs://metadata123",
    )
}

/// Distinct, non-null addresses for multi-party tests.
pub fn multi_party_addresses(count: usize) -> Vec<Address> {
    (0..count)
        .map(|i| Address::new(format!("ST{i:038}")))
        .collect()
}
