//! Merkle commitment over burn records.
//!
//! - [`MerkleTree`]: binary tree over precomputed leaves with sorted-pair
//!   node hashing; an unpaired node at the end of a layer is promoted as-is
//! - [`build`]: records → tree, hex root, and a [`ProofIndex`] keyed by
//!   `address_id1_..._idN`
//! - [`verify_record`] / [`verify_hex`]: recompute the root from a leaf and
//!   its sibling path

pub mod builder;
pub mod index;
pub mod proof;
pub mod tree;

pub use builder::{build, BuildOutput};
pub use index::{IndexError, ProofIndex, ProofKey};
pub use proof::{compute_root, verify_hex, verify_proof, verify_record, Proof};
pub use tree::{MerkleTree, EMPTY_ROOT_HEX};
