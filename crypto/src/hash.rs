//! Keccak-256 hashing for leaves and tree nodes.

use redeem_types::Hash32;
use tiny_keccak::{Hasher as _, Keccak};

/// Compute a Keccak-256 digest of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Combine two sibling nodes into their parent.
///
/// The pair is sorted by byte value before hashing, so the result does not
/// depend on which sibling sits on the left.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Hash32::new(keccak256_multi(&[lo.as_bytes(), hi.as_bytes()]))
}
