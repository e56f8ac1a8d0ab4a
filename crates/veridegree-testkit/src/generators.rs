//! Proptest generators for property-based testing.

use proptest::prelude::*;

use veridegree_core::{Address, CredentialDraft, NULL_ADDRESS};

/// Generate a non-null address.
pub fn address() -> impl Strategy<Value = Address> {
    "ST[0-9A-Z]{30,39}".prop_map(Address::new)
}

/// Generate an address from a small pool, so generated operations collide.
pub fn pooled_address(pool: usize) -> impl Strategy<Value = Address> {
    (0..pool).prop_map(|i| Address::new(format!("ST{i:038}")))
}

/// Generate a non-empty text field.
pub fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 :/._-]{1,32}".prop_map(String::from)
}

/// Generate a draft that passes validation.
pub fn credential_draft() -> impl Strategy<Value = CredentialDraft> {
    (address(), field(), field(), field(), field()).prop_map(
        |(recipient, credential_type, issuer, recipient_name, metadata_uri)| CredentialDraft {
            recipient,
            credential_type,
            issuer,
            recipient_name,
            metadata_uri,
        },
    )
}

/// Generate a draft that fails validation: null recipient or one empty field.
pub fn invalid_draft() -> impl Strategy<Value = CredentialDraft> {
    (credential_draft(), 0usize..5).prop_map(|(mut draft, which)| {
        match which {
            0 => draft.recipient = Address::new(NULL_ADDRESS),
            1 => draft.credential_type.clear(),
            2 => draft.issuer.clear(),
            3 => draft.recipient_name.clear(),
            _ => draft.metadata_uri.clear(),
        }
        draft
    })
}

/// A batch of drafts with exactly one invalid element.
#[derive(Debug, Clone)]
pub struct BadBatch {
    pub drafts: Vec<CredentialDraft>,
    pub bad_index: usize,
}

impl Arbitrary for BadBatch {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::vec(credential_draft(), 0..9),
            invalid_draft(),
            any::<prop::sample::Index>(),
        )
            .prop_map(|(mut drafts, bad, index)| {
                let bad_index = index.index(drafts.len() + 1);
                drafts.insert(bad_index, bad);
                BadBatch { drafts, bad_index }
            })
            .boxed()
    }
}

/// One owner action on a credential's access list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOp {
    Grant(Address),
    Revoke(Address),
    /// Let ledger time move forward.
    Tick,
}

/// Generate a sequence of access operations over a pool of verifiers.
pub fn access_ops(pool: usize, max_len: usize) -> impl Strategy<Value = Vec<AccessOp>> {
    let op = prop_oneof![
        3 => pooled_address(pool).prop_map(AccessOp::Grant),
        3 => pooled_address(pool).prop_map(AccessOp::Revoke),
        1 => Just(AccessOp::Tick),
    ];
    prop::collection::vec(op, 0..=max_len)
}
