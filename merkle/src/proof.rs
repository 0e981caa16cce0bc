//! Merkle proofs and root recomputation.

use serde::{Deserialize, Serialize};

use redeem_crypto::{hash_leaf, hash_pair};
use redeem_types::{Address, Hash32, TokenIds};

/// Sibling hashes from a leaf up to the root.
///
/// Serialized as a JSON array of `0x`-prefixed hex strings, the format of the
/// proof source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof(Vec<Hash32>);

impl Proof {
    pub fn new(siblings: Vec<Hash32>) -> Self {
        Self(siblings)
    }

    pub fn siblings(&self) -> &[Hash32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex strings, in path order.
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(Hash32::to_hex).collect()
    }

    /// Parse a list of hex siblings. Fails on the first malformed entry.
    pub fn from_hex<S: AsRef<str>>(siblings: &[S]) -> Result<Self, redeem_types::TypesError> {
        siblings
            .iter()
            .map(|s| Hash32::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<Hash32>> for Proof {
    fn from(siblings: Vec<Hash32>) -> Self {
        Self(siblings)
    }
}

/// Fold a proof over a leaf using sorted-pair hashing.
pub fn compute_root(leaf: &Hash32, proof: &Proof) -> Hash32 {
    proof
        .siblings()
        .iter()
        .fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
}

pub fn verify_proof(root: &Hash32, leaf: &Hash32, proof: &Proof) -> bool {
    compute_root(leaf, proof) == *root
}

/// Verify that `(address, token_ids)` is committed under `root`.
pub fn verify_record(
    root: &Hash32,
    proof: &Proof,
    address: &Address,
    token_ids: &TokenIds,
) -> bool {
    verify_proof(root, &hash_leaf(address, token_ids), proof)
}

/// Verify from untyped inputs, as they arrive from a proof file or a caller.
///
/// Any malformed input (root, sibling, or address) yields `false`; ids are
/// normalized before hashing.
pub fn verify_hex<S: AsRef<str>>(
    root: &str,
    proof: &[S],
    address: &str,
    token_ids: &[u64],
) -> bool {
    let Ok(root) = Hash32::parse(root) else {
        tracing::debug!(root, "verification rejected: malformed root");
        return false;
    };
    let Ok(proof) = Proof::from_hex(proof) else {
        tracing::debug!("verification rejected: malformed proof sibling");
        return false;
    };
    let Ok(address) = Address::parse(address) else {
        tracing::debug!(address, "verification rejected: malformed address");
        return false;
    };
    verify_record(&root, &proof, &address, &TokenIds::from(token_ids.to_vec()))
}
