//! # VeriDegree
//!
//! A permissioned credential-lifecycle ledger: a registry of uniquely owned,
//! revocable credentials, an access-control ledger through which owners
//! grant verifiers visibility into their credentials, and a log of
//! verification requests.
//!
//! ## Overview
//!
//! - **Credentials**: issued by the admin, owned by exactly one address,
//!   revocable, transferable by their owner while not revoked
//! - **Access control**: per (credential, verifier) grants, changeable only
//!   by the credential's current owner as the registry reports it
//! - **Verification requests**: point-in-time attestations of validity
//!
//! Every machine reads time from one shared [`Clock`](veridegree_core::Clock)
//! and checks the pause flag and caller role before touching state. Batch
//! operations are all-or-nothing.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use veridegree::{Ledger, LedgerConfig};
//! use veridegree::core::{Address, CredentialDraft, ManualClock};
//!
//! let admin = Address::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
//! let owner = Address::new("ST2CY5V39N7V71J3X4H8E3T63Z84Y5P3W6Z8G3");
//! let verifier = Address::new("ST3NBRSFKX28F3V56Z1XJ3X4H8E3T63Z84Y5P3W6Z8G3");
//!
//! let ledger = Ledger::new(LedgerConfig::new(admin.clone()), Arc::new(ManualClock::new(100))).unwrap();
//!
//! let id = ledger
//!     .registry()
//!     .issue(&admin, CredentialDraft::new(owner.clone(), "Diploma", "University XYZ",
//!         "John Doe", "ipfs://metadata123"))
//!     .unwrap();
//!
//! ledger.access().grant(&owner, id, verifier.clone()).unwrap();
//! assert!(ledger.registry().verify_with_access(&verifier, id).is_ok());
//!
//! let request = ledger.verification().request_verification(verifier, id);
//! assert!(ledger.verification().get_verification_request(request).unwrap().is_verified);
//! ```
//!
//! ## Re-exports
//!
//! - `veridegree::core` - Addresses, ids, the credential record, clock, lookups
//! - `veridegree::registry` - The credential registry
//! - `veridegree::access` - The access-control ledger
//! - `veridegree::verify` - The verification registry

pub mod error;
pub mod ledger;

// Re-export component crates
pub use veridegree_access as access;
pub use veridegree_core as core;
pub use veridegree_registry as registry;
pub use veridegree_verify as verify;

pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig, LedgerSnapshot};

// Re-export commonly used types
pub use veridegree_access::{AccessControlLedger, AccessError, AccessHistory};
pub use veridegree_core::{Address, Credential, CredentialDraft, CredentialId, ErrorKind, RequestId};
pub use veridegree_registry::{CredentialRegistry, RegistryError};
pub use veridegree_verify::{VerificationError, VerificationRegistry, VerificationRequest};
