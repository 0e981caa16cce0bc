//! Cryptographic primitives for burn-redemption proofs.
//!
//! - **Keccak-256** (the EVM hash, not NIST SHA3-256)
//! - Leaf derivation as `keccak256(abi.encodePacked(address, uint256[]))`
//! - Sorted-pair node hashing, matching OpenZeppelin's `MerkleProof`

pub mod hash;
pub mod leaf;

pub use hash::{hash_pair, keccak256, keccak256_multi};
pub use leaf::{encode_leaf, hash_leaf, hash_record};
