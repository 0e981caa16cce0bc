#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use redeem_merkle::{verify_hex, verify_record, Proof};
use redeem_types::{Address, Hash32, TokenIds};

#[derive(Debug, Arbitrary)]
struct Input {
    root: [u8; 32],
    siblings: Vec<[u8; 32]>,
    address: [u8; 20],
    token_ids: Vec<u64>,
    raw_root: String,
    raw_siblings: Vec<String>,
    raw_address: String,
}

fuzz_target!(|input: Input| {
    let proof = Proof::new(input.siblings.into_iter().map(Hash32::new).collect());
    let _ = verify_record(
        &Hash32::new(input.root),
        &proof,
        &Address::new(input.address),
        &TokenIds::from(input.token_ids.clone()),
    );

    // Malformed strings must read as "invalid", never panic.
    let _ = verify_hex(
        &input.raw_root,
        &input.raw_siblings,
        &input.raw_address,
        &input.token_ids,
    );
});
