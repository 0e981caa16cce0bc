//! Layered Merkle tree with sorted-pair hashing.

use redeem_crypto::hash_pair;
use redeem_types::Hash32;

use crate::proof::Proof;

/// Hex root reported for a tree with no leaves.
pub const EMPTY_ROOT_HEX: &str = "0x";

/// A binary Merkle tree stored as a list of layers, leaves first.
///
/// Leaves are used as given (no re-hashing). Each parent is
/// `hash_pair(left, right)`; a node left without a sibling at the end of a
/// layer moves up unchanged and contributes nothing to the proofs below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<Hash32>) -> Self {
        let mut layers = vec![leaves];
        while let Some(current) = layers.last() {
            if current.len() <= 1 {
                break;
            }
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    _ => pair[0],
                })
                .collect();
            layers.push(next);
        }
        Self { layers }
    }

    pub fn leaves(&self) -> &[Hash32] {
        &self.layers[0]
    }

    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Number of hashing levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The root hash, or `None` for an empty tree.
    pub fn root(&self) -> Option<Hash32> {
        self.layers.last().and_then(|top| top.first()).copied()
    }

    /// The root as `0x`-prefixed hex; [`EMPTY_ROOT_HEX`] for an empty tree.
    pub fn root_hex(&self) -> String {
        self.root()
            .map(|r| r.to_hex())
            .unwrap_or_else(|| EMPTY_ROOT_HEX.to_string())
    }

    /// Sibling path from the leaf at `index` up to the root.
    pub fn proof(&self, index: usize) -> Option<Proof> {
        if index >= self.len() {
            return None;
        }
        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = idx ^ 1;
            if let Some(node) = layer.get(sibling) {
                siblings.push(*node);
            }
            idx /= 2;
        }
        Some(Proof::new(siblings))
    }
}
