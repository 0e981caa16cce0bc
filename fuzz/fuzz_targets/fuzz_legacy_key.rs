#![no_main]

use libfuzzer_sys::fuzz_target;

use redeem_redemption::legacy::parse_legacy_key;

// Legacy key parsing must never panic, and whatever it accepts must come
// back with sorted ids.
fuzz_target!(|data: &[u8]| {
    let Ok(key) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(parsed) = parse_legacy_key(key) {
        assert!(parsed.token_ids.windows(2).all(|w| w[0] <= w[1]));
    }
});
