use proptest::prelude::*;

use redeem_types::{Address, Hash32, TokenIds};

proptest! {
    /// TokenIds are always strictly ascending after construction.
    #[test]
    fn token_ids_strictly_ascending(ids in prop::collection::vec(any::<u64>(), 0..64)) {
        let set = TokenIds::new(ids);
        prop_assert!(set.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    /// TokenIds ignore input order: reversing the input yields the same set.
    #[test]
    fn token_ids_order_invariant(ids in prop::collection::vec(0u64..10_000, 0..32)) {
        let mut reversed = ids.clone();
        reversed.reverse();
        prop_assert_eq!(TokenIds::new(ids), TokenIds::new(reversed));
    }

    /// Every input id survives normalization.
    #[test]
    fn token_ids_keep_every_member(ids in prop::collection::vec(0u64..500, 1..32)) {
        let set = TokenIds::new(ids.clone());
        for id in ids {
            prop_assert!(set.contains(id));
        }
    }

    /// Address parsing is case-insensitive.
    #[test]
    fn address_parse_ignores_case(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let upper = format!("0x{}", addr.to_hex()[2..].to_uppercase());
        prop_assert_eq!(Address::parse(&upper).unwrap(), addr);
    }

    /// Hash32 ordering agrees with byte-array ordering.
    #[test]
    fn hash_ordering_matches_bytes(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assert_eq!(Hash32::new(a).cmp(&Hash32::new(b)), a.cmp(&b));
    }
}
