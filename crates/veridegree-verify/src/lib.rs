//! # VeriDegree Verification Registry
//!
//! A log of verification requests. Each request records whether the
//! credential was active at the moment it was made; the outcome is an
//! attestation about that moment and is never re-evaluated.
//!
//! [`VerificationRegistry::batch_request_verifications`] is different: it
//! checks validity for many credentials and records nothing.

pub mod error;
pub mod registry;
pub mod request;

pub use error::{Result, VerificationError};
pub use registry::{VerificationRegistry, VerificationSnapshot};
pub use request::VerificationRequest;
