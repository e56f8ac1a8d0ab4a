//! # VeriDegree Access Control
//!
//! Verifier visibility into credentials, granted and revoked by the
//! credential's current owner.
//!
//! ## Overview
//!
//! The ledger keeps one record per (credential, verifier) pair. A record is
//! created by the first grant and is never removed: a revoke flips it to
//! disallowed and stamps the revoke time. Every mutation first asks the
//! credential registry, through
//! [`CredentialLookup`](veridegree_core::CredentialLookup), who owns the
//! credential right now; only that owner may grant or revoke.
//!
//! ## Key Concepts
//!
//! - **Grant**: the `allowed` flag for a pair
//! - **History**: the latest grant time and, if revoked since, the revoke time
//! - **Access log**: every grant and revoke for a pair, in order
//!
//! History keeps only the latest grant/revoke pair: a re-grant overwrites the
//! grant time and clears the revoke time. The access log is the full trail.

pub mod error;
pub mod grant;
pub mod ledger;
pub mod state;

pub use error::{AccessError, Result};
pub use grant::{AccessAction, AccessEvent, AccessGrant, AccessHistory, AccessKey};
pub use ledger::{AccessConfig, AccessControlLedger, AccessSnapshot};
pub use state::{AccessRecord, AccessState};
