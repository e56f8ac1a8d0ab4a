//! # VeriDegree Credential Registry
//!
//! The registry owns every credential record and its current owner. It is
//! the leaf machine of the ledger: the access-control ledger and the
//! verification registry consult it through
//! [`CredentialLookup`](veridegree_core::CredentialLookup), which
//! [`CredentialRegistry`] implements.
//!
//! ## Roles
//!
//! - **Admin**: issues and revokes credentials, pauses the registry, and
//!   links an access-control ledger.
//! - **Owner**: transfers a credential to a new owner.
//! - **Anyone**: verifies a credential and runs read-only queries.
//!
//! ## Batches
//!
//! [`CredentialRegistry::issue_batch`] is all-or-nothing. Every element is
//! validated in order before anything is written; the first invalid element
//! fails the whole call and leaves the registry untouched.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use veridegree_core::{Address, CredentialDraft, ManualClock};
//! use veridegree_registry::{CredentialRegistry, RegistryConfig};
//!
//! let admin = Address::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
//! let registry = CredentialRegistry::new(
//!     RegistryConfig::new(admin.clone()),
//!     Arc::new(ManualClock::new(100)),
//! );
//!
//! let id = registry
//!     .issue(
//!         &admin,
//!         CredentialDraft::new("ST2CY5V39N7V71J3X4H8E3T63Z84Y5P3W6Z8G3", "Diploma",
//!             "University XYZ", "John Doe", "ipfs://metadata123"),
//!     )
//!     .unwrap();
//! assert_eq!(id.get(), 1);
//! ```

pub mod batch;
pub mod error;
pub mod registry;
pub mod state;

pub use batch::IssueBatch;
pub use error::{RegistryError, Result};
pub use registry::{CredentialRegistry, RegistryConfig, RegistrySnapshot};
pub use state::RegistryState;
