//! Records → tree, root, and proof index.

use redeem_crypto::hash_record;
use redeem_types::BurnRecord;

use crate::index::{ProofIndex, ProofKey};
use crate::tree::MerkleTree;

/// Everything a campaign publishes: the tree, its hex root (the value set
/// on-chain), and the proof of every record.
#[derive(Clone, Debug)]
pub struct BuildOutput {
    pub tree: MerkleTree,
    pub root: String,
    pub proofs: ProofIndex,
}

/// Build the campaign tree over `records`, in input order.
///
/// Records are normalized by construction. Duplicate records are committed
/// twice but share a key; the proof of the first occurrence is kept.
pub fn build(records: &[BurnRecord]) -> BuildOutput {
    let leaves = records.iter().map(hash_record).collect();
    let tree = MerkleTree::new(leaves);

    let mut proofs = ProofIndex::new();
    for (index, record) in records.iter().enumerate() {
        let key = ProofKey::canonical(&record.address, &record.token_ids);
        let Some(proof) = tree.proof(index) else {
            continue;
        };
        if !proofs.insert_if_absent(key.as_str(), proof) {
            tracing::warn!(key = %key, index, "duplicate burn record, keeping first proof");
        }
    }

    let root = tree.root_hex();
    tracing::debug!(
        records = records.len(),
        keys = proofs.len(),
        depth = tree.depth(),
        root = %root,
        "built redemption tree"
    );

    BuildOutput { tree, root, proofs }
}
