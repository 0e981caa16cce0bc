//! Leaf derivation for burn records.
//!
//! A leaf is `keccak256(abi.encodePacked(address, uint256[] tokenIds))`: the
//! 20 raw address bytes followed by every id as a 32-byte big-endian word.
//! The ids must already be sorted, which `TokenIds` guarantees.

use redeem_types::{Address, BurnRecord, Hash32, TokenIds};

use crate::hash::keccak256;

const WORD: usize = 32;

/// Packed encoding of `(address, uint256[])`.
pub fn encode_leaf(address: &Address, token_ids: &TokenIds) -> Vec<u8> {
    let mut out = Vec::with_capacity(Address::LEN + WORD * token_ids.len());
    out.extend_from_slice(address.as_bytes());
    for id in token_ids.iter() {
        let mut word = [0u8; WORD];
        word[WORD - 8..].copy_from_slice(&id.to_be_bytes());
        out.extend_from_slice(&word);
    }
    out
}

/// Leaf hash for an address and its burned ids.
pub fn hash_leaf(address: &Address, token_ids: &TokenIds) -> Hash32 {
    Hash32::new(keccak256(&encode_leaf(address, token_ids)))
}

/// Leaf hash for a burn record.
pub fn hash_record(record: &BurnRecord) -> Hash32 {
    hash_leaf(&record.address, &record.token_ids)
}
