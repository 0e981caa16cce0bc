//! Proof lookup.
//!
//! Matchers run in a fixed order and the first hit wins. The canonical
//! matcher is the only one indexes built by this workspace ever need; the
//! rest live in [`crate::legacy`] and exist for proof files whose key layout
//! drifted.

use std::fmt;

use redeem_merkle::{Proof, ProofIndex, ProofKey};
use redeem_types::{Address, TokenIds};

use crate::legacy::LegacyKeyMatcher;

/// Which matcher produced a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    TokenOnly,
    Containment,
    Parsed,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::TokenOnly => "token-only",
            MatchStrategy::Containment => "containment",
            MatchStrategy::Parsed => "parsed",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupHit<'a> {
    pub key: &'a str,
    pub proof: &'a Proof,
    pub strategy: MatchStrategy,
}

/// One way of locating a record's proof in an index.
pub trait KeyMatcher: Send + Sync {
    fn strategy(&self) -> MatchStrategy;

    fn find<'a>(
        &self,
        index: &'a ProofIndex,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Option<(&'a str, &'a Proof)>;
}

/// Direct lookup of the canonical `address_id1_..._idN` key.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalMatcher;

impl KeyMatcher for CanonicalMatcher {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Exact
    }

    fn find<'a>(
        &self,
        index: &'a ProofIndex,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Option<(&'a str, &'a Proof)> {
        let key = ProofKey::canonical(address, token_ids);
        index.get_key_value(key.as_str())
    }
}

pub struct ProofLookup {
    matchers: Vec<Box<dyn KeyMatcher>>,
}

impl ProofLookup {
    /// Canonical keys only.
    pub fn canonical() -> Self {
        Self {
            matchers: vec![Box::new(CanonicalMatcher)],
        }
    }

    /// Canonical keys first, then every legacy layout.
    pub fn with_legacy() -> Self {
        let mut matchers: Vec<Box<dyn KeyMatcher>> = vec![Box::new(CanonicalMatcher)];
        for legacy in LegacyKeyMatcher::ALL {
            matchers.push(Box::new(legacy));
        }
        Self { matchers }
    }

    pub fn strategies(&self) -> Vec<MatchStrategy> {
        self.matchers.iter().map(|m| m.strategy()).collect()
    }

    /// First hit across the matchers, in order. `None` means the record has
    /// no proof in this index, which is an ordinary outcome.
    pub fn find<'a>(
        &self,
        index: &'a ProofIndex,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Option<LookupHit<'a>> {
        let hit = self.matchers.iter().find_map(|matcher| {
            matcher
                .find(index, address, token_ids)
                .map(|(key, proof)| LookupHit {
                    key,
                    proof,
                    strategy: matcher.strategy(),
                })
        });
        match &hit {
            Some(hit) if hit.strategy != MatchStrategy::Exact => {
                tracing::debug!(
                    key = hit.key,
                    strategy = %hit.strategy,
                    "proof found via legacy key layout"
                );
            }
            None => {
                tracing::debug!(%address, ids = %token_ids, "no matching proof");
            }
            _ => {}
        }
        hit
    }
}

impl Default for ProofLookup {
    fn default() -> Self {
        Self::with_legacy()
    }
}
