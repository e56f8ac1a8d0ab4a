//! # VeriDegree Testkit
//!
//! Testing utilities for the VeriDegree ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: well-known addresses and a pre-wired [`Ledger`](veridegree::Ledger)
//!   on a manual clock
//! - **Generators**: Proptest strategies for addresses, drafts, batches, and
//!   access operation sequences
//!
//! ## Test Fixtures
//!
//! ```rust
//! use veridegree_testkit::fixtures::{TestFixture, USER1};
//!
//! let fixture = TestFixture::new();
//! let id = fixture.issue_diploma(USER1, "John Doe");
//! assert_eq!(fixture.ledger.registry().total_credentials(), 1);
//! assert_eq!(id.get(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use veridegree_testkit::generators::credential_draft;
//!
//! proptest! {
//!     #[test]
//!     fn issued_drafts_are_valid(draft in credential_draft()) {
//!         prop_assert!(veridegree_core::validate_draft(&draft).is_ok());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{multi_party_addresses, TestFixture};
pub use generators::{AccessOp, BadBatch};
