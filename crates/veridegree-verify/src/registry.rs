//! The verification registry machine.
//!
//! [`VerificationRegistry`] keeps an append-only log of verification
//! requests. It reads credential status through a [`CredentialLookup`] and
//! never writes to the registry it consults.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use veridegree_core::{Address, Clock, CodecError, CredentialId, CredentialLookup, RequestId};

use crate::error::{Result, VerificationError};
use crate::request::VerificationRequest;

/// Serializable image of the request log. The registry link is not captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSnapshot {
    /// Last id handed out; 0 before the first request.
    pub request_counter: u64,
    pub requests: Vec<VerificationRequest>,
}

/// Records verification attempts against a credential registry.
pub struct VerificationRegistry {
    registry: Arc<dyn CredentialLookup>,
    clock: Arc<dyn Clock>,
    inner: RwLock<VerificationInner>,
}

#[derive(Default)]
struct VerificationInner {
    request_counter: u64,
    requests: BTreeMap<RequestId, VerificationRequest>,
}

impl VerificationRegistry {
    /// Create an empty log backed by `registry`.
    pub fn new(registry: Arc<dyn CredentialLookup>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            clock,
            inner: RwLock::new(VerificationInner::default()),
        }
    }

    /// Rebuild the log from a snapshot, backed by `registry`.
    ///
    /// Fails if two records share an id, or if the counter is behind the
    /// highest stored id, since new requests would then overwrite old ones.
    pub fn from_snapshot(
        snapshot: VerificationSnapshot,
        registry: Arc<dyn CredentialLookup>,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, CodecError> {
        let mut requests = BTreeMap::new();
        for request in snapshot.requests {
            if request.id.get() > snapshot.request_counter {
                return Err(rejected(format!(
                    "request {} is past the counter {}",
                    request.id, snapshot.request_counter
                )));
            }
            if let Some(duplicate) = requests.insert(request.id, request) {
                return Err(rejected(format!("request {} appears twice", duplicate.id)));
            }
        }

        Ok(Self {
            registry,
            clock,
            inner: RwLock::new(VerificationInner {
                request_counter: snapshot.request_counter,
                requests,
            }),
        })
    }

    /// Capture the current log.
    pub fn snapshot(&self) -> VerificationSnapshot {
        let inner = self.read();
        VerificationSnapshot {
            request_counter: inner.request_counter,
            requests: inner.requests.values().cloned().collect(),
        }
    }

    /// Record a verification attempt and return its id.
    ///
    /// Never fails: a missing or revoked credential is recorded with
    /// `is_verified == false`.
    pub fn request_verification(&self, verifier: Address, credential_id: CredentialId) -> RequestId {
        let is_verified = self.registry.status(credential_id).is_active();
        let now = self.clock.now();

        let mut inner = self.write();
        inner.request_counter += 1;
        let id = RequestId::new(inner.request_counter);
        info!(
            request_id = %id,
            credential_id = %credential_id,
            verifier = %verifier,
            is_verified,
            "verification requested"
        );
        inner.requests.insert(
            id,
            VerificationRequest {
                id,
                credential_id,
                verifier,
                request_time: now,
                is_verified,
                verification_time: now,
            },
        );
        id
    }

    /// A recorded request, if `id` was ever handed out.
    pub fn get_verification_request(&self, id: RequestId) -> Option<VerificationRequest> {
        self.read().requests.get(&id).cloned()
    }

    /// Check many credentials at once without recording anything.
    ///
    /// One slot per input id, in input order.
    pub fn batch_request_verifications(
        &self,
        verifier: &Address,
        credential_ids: &[CredentialId],
    ) -> Vec<Result<()>> {
        credential_ids
            .iter()
            .map(|&id| {
                let active = self.registry.status(id).is_active();
                debug!(credential_id = %id, verifier = %verifier, active, "verification check");
                if active {
                    Ok(())
                } else {
                    Err(VerificationError::CredentialRevokedOrMissing(id))
                }
            })
            .collect()
    }

    /// Number of requests recorded so far.
    pub fn request_count(&self) -> u64 {
        self.read().request_counter
    }

    /// Requests made by `verifier`, oldest first.
    pub fn requests_by(&self, verifier: &Address) -> Vec<VerificationRequest> {
        self.read()
            .requests
            .values()
            .filter(|r| &r.verifier == verifier)
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, VerificationInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VerificationInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn rejected(reason: String) -> CodecError {
    warn!(reason = %reason, "verification snapshot rejected");
    CodecError::Inconsistent(reason)
}

impl fmt::Debug for VerificationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRegistry")
            .field("request_count", &self.read().request_counter)
            .finish()
    }
}
