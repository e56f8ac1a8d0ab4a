//! Input validation shared by the machines.
//!
//! These checks run before any state is touched, so a failure never leaves
//! a partial write behind.

use crate::credential::CredentialDraft;
use crate::error::ValidationError;
use crate::types::Address;

/// Reject the reserved null address as a recipient or verifier.
pub fn validate_recipient(recipient: &Address) -> Result<(), ValidationError> {
    if recipient.is_null() {
        return Err(ValidationError::NullAddress);
    }
    Ok(())
}

/// Validate a single issuance: recipient first, then the text fields.
pub fn validate_draft(draft: &CredentialDraft) -> Result<(), ValidationError> {
    validate_recipient(&draft.recipient)?;

    let fields = [
        ("credential_type", &draft.credential_type),
        ("issuer", &draft.issuer),
        ("recipient_name", &draft.recipient_name),
        ("metadata_uri", &draft.metadata_uri),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            return Err(ValidationError::EmptyField(name));
        }
    }

    Ok(())
}

/// Enforce the per-call batch bound.
pub fn validate_batch_size(len: usize, max: usize) -> Result<(), ValidationError> {
    if len > max {
        return Err(ValidationError::BatchTooLarge { len, max });
    }
    Ok(())
}
