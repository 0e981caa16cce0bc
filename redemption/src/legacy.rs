//! Compatibility shim for legacy proof-file key layouts.
//!
//! Proof files produced by older generators do not always use the canonical
//! `address_id1_..._idN` key. Layouts seen in the wild:
//! - token ids only: `500_501`
//! - a trailing transaction hash: `0xabc…_500_501_0xdeadbeef…`
//! - checksummed or unprefixed addresses: `0xAbC…_500_501`, `abc…_500_501`
//!
//! Nothing outside [`crate::lookup::ProofLookup`] should depend on these
//! matchers; they are only consulted after the canonical key misses.

use redeem_merkle::{Proof, ProofIndex, ProofKey};
use redeem_types::{Address, TokenIds};

use crate::lookup::{KeyMatcher, MatchStrategy};

/// A legacy key split into its address prefix and numeric segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedKey {
    pub address: Address,
    /// Numeric segments, sorted ascending. Duplicates are kept.
    pub token_ids: Vec<u64>,
}

/// Parse `address_seg_seg_…`. The first segment must be an address; later
/// segments that are not decimal integers (such as transaction hashes) are
/// skipped.
pub fn parse_legacy_key(key: &str) -> Option<ParsedKey> {
    let mut segments = key.split(ProofKey::SEPARATOR);
    let address = Address::parse(segments.next()?).ok()?;
    let mut token_ids: Vec<u64> = segments
        .filter(|s| is_numeric(s))
        .filter_map(|s| s.parse().ok())
        .collect();
    token_ids.sort_unstable();
    Some(ParsedKey { address, token_ids })
}

/// The legacy lookup steps, consulted in [`LegacyKeyMatcher::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegacyKeyMatcher {
    /// Keys that carry the ids but no address segment, possibly behind a
    /// label or ahead of a transaction hash.
    TokenOnly,
    /// Keys that contain the lowercase address and every requested id as a
    /// whole `_id_` segment, in any position and alongside extra segments.
    Containment,
    /// Exhaustive scan: parse every key and compare address and id list exactly.
    Parsed,
}

impl LegacyKeyMatcher {
    pub const ALL: [LegacyKeyMatcher; 3] = [
        LegacyKeyMatcher::TokenOnly,
        LegacyKeyMatcher::Containment,
        LegacyKeyMatcher::Parsed,
    ];
}

impl KeyMatcher for LegacyKeyMatcher {
    fn strategy(&self) -> MatchStrategy {
        match self {
            LegacyKeyMatcher::TokenOnly => MatchStrategy::TokenOnly,
            LegacyKeyMatcher::Containment => MatchStrategy::Containment,
            LegacyKeyMatcher::Parsed => MatchStrategy::Parsed,
        }
    }

    fn find<'a>(
        &self,
        index: &'a ProofIndex,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Option<(&'a str, &'a Proof)> {
        match self {
            LegacyKeyMatcher::TokenOnly => find_token_only(index, token_ids),
            LegacyKeyMatcher::Containment => find_containing(index, address, token_ids),
            LegacyKeyMatcher::Parsed => find_parsed(index, address, token_ids),
        }
    }
}

fn find_token_only<'a>(
    index: &'a ProofIndex,
    token_ids: &TokenIds,
) -> Option<(&'a str, &'a Proof)> {
    if token_ids.is_empty() {
        return None;
    }
    let wanted = Some(token_ids.as_slice());
    index.get_key_value(&token_ids.joined()).or_else(|| {
        index
            .iter()
            .find(|(key, _)| leading_token_run(key).as_deref() == wanted)
    })
}

/// The first run of numeric segments of an address-less key, sorted.
///
/// A leading non-numeric label (`redeem_500_501`) is skipped and whatever
/// follows the run (`500_501_0xdeadbeef`) is ignored. Keys that start with
/// an address belong to the other steps and yield `None`.
fn leading_token_run(key: &str) -> Option<Vec<u64>> {
    let mut segments = key.split(ProofKey::SEPARATOR).peekable();
    let first = *segments.peek()?;
    if !is_numeric(first) {
        if Address::parse(first).is_ok() {
            return None;
        }
        segments.next();
    }
    let mut run = Vec::new();
    for segment in segments {
        if !is_numeric(segment) {
            break;
        }
        run.push(segment.parse::<u64>().ok()?);
    }
    if run.is_empty() {
        return None;
    }
    run.sort_unstable();
    Some(run)
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn find_containing<'a>(
    index: &'a ProofIndex,
    address: &Address,
    token_ids: &TokenIds,
) -> Option<(&'a str, &'a Proof)> {
    if token_ids.is_empty() {
        return None;
    }
    let address = address.to_hex();
    let needles: Vec<String> = token_ids.iter().map(|id| format!("_{id}_")).collect();
    index.iter().find(|(key, _)| {
        if !key.contains(address.as_str()) {
            return false;
        }
        let padded = format!("_{key}_");
        needles.iter().all(|needle| padded.contains(needle.as_str()))
    })
}

fn find_parsed<'a>(
    index: &'a ProofIndex,
    address: &Address,
    token_ids: &TokenIds,
) -> Option<(&'a str, &'a Proof)> {
    index.iter().find(|(key, _)| {
        parse_legacy_key(key).is_some_and(|parsed| {
            parsed.address == *address && parsed.token_ids == token_ids.as_slice()
        })
    })
}
