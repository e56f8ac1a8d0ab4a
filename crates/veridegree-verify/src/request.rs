//! The verification request record.

use serde::{Deserialize, Serialize};
use veridegree_core::{Address, CredentialId, RequestId, Timestamp};

/// One recorded verification attempt. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: RequestId,
    pub credential_id: CredentialId,
    pub verifier: Address,
    pub request_time: Timestamp,

    /// Whether the credential existed and was not revoked at `request_time`.
    pub is_verified: bool,

    pub verification_time: Timestamp,
}
