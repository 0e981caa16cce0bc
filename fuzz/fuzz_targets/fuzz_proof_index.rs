#![no_main]

use libfuzzer_sys::fuzz_target;

use redeem_merkle::ProofIndex;
use redeem_redemption::ProofLookup;
use redeem_types::{Address, TokenIds};

// Arbitrary proof documents: parsing, lookup across every key layout, and
// re-serialization must not panic.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(index) = ProofIndex::from_json(json) else {
        return;
    };

    let lookup = ProofLookup::with_legacy();
    let address = Address::new([0xab; 20]);
    for ids in [TokenIds::default(), TokenIds::from([0]), TokenIds::from([1, 2, 3])] {
        let _ = lookup.find(&index, &address, &ids);
    }

    let reparsed = index
        .to_json()
        .ok()
        .and_then(|out| ProofIndex::from_json(&out).ok());
    assert_eq!(reparsed.as_ref(), Some(&index));
});
