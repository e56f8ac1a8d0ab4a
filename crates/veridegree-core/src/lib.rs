//! # VeriDegree Core
//!
//! Pure primitives shared by the VeriDegree credential ledger: addresses,
//! identifiers, the credential record, ledger time, and the lookup traits
//! the machines use to consult each other.
//!
//! This crate contains no I/O, no storage, no networking. The hosting
//! substrate serializes calls and persists state; everything here is plain
//! computation over values.
//!
//! ## Key Types
//!
//! - [`Address`] - A principal (admin, owner, recipient, verifier)
//! - [`CredentialId`] - Dense, monotonically assigned credential identifier
//! - [`Credential`] - The issued, revocable credential record
//! - [`Clock`] - Source of ledger timestamps
//! - [`CredentialLookup`] - Read-only view of the credential registry
//! - [`ErrorKind`] - Stable failure taxonomy shared by every machine

pub mod canonical;
pub mod clock;
pub mod credential;
pub mod error;
pub mod lookup;
pub mod types;
pub mod validation;

pub use canonical::{from_cbor, to_cbor};
pub use clock::{Clock, ManualClock, SystemClock};
pub use credential::{Credential, CredentialDraft};
pub use error::{CodecError, ErrorKind, ValidationError};
pub use lookup::{AccessLookup, CredentialLookup, CredentialStatus};
pub use types::{Address, CredentialId, RequestId, Timestamp, NULL_ADDRESS};
pub use validation::{validate_batch_size, validate_draft, validate_recipient};

/// Default upper bound on the number of elements in one batch call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;
