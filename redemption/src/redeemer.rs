//! Redemption facade: cache-or-fetch, lookup, and verification.

use redeem_merkle::{verify_record, Proof, ProofIndex, ProofKey};
use redeem_store::KeyValueStore;
use redeem_types::{Address, Hash32, TokenIds};

use crate::cache::CampaignCache;
use crate::clock::{Clock, SystemClock};
use crate::error::RedemptionError;
use crate::fetch::ProofFetcher;
use crate::lookup::ProofLookup;
use crate::source::{Acquired, ProofSource, SourceOrigin};

/// Outcome of an eligibility check, for display to the holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    /// A proof exists and reproduces the root.
    Eligible { key: String, proof: Proof },
    /// No proof for these tokens, or the proof does not reproduce the root.
    NotEligible,
    /// Proofs could not be obtained; worth retrying later.
    Unavailable,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }
}

pub struct Redeemer<S, F, C = SystemClock> {
    cache: CampaignCache<S>,
    source: ProofSource<F>,
    lookup: ProofLookup,
    clock: C,
}

impl<S: KeyValueStore, F: ProofFetcher> Redeemer<S, F, SystemClock> {
    pub fn new(cache: CampaignCache<S>, source: ProofSource<F>) -> Self {
        Self::with_clock(cache, source, SystemClock)
    }
}

impl<S: KeyValueStore, F: ProofFetcher, C: Clock> Redeemer<S, F, C> {
    pub fn with_clock(cache: CampaignCache<S>, source: ProofSource<F>, clock: C) -> Self {
        Self {
            cache,
            source,
            lookup: ProofLookup::default(),
            clock,
        }
    }

    /// Replace the lookup chain, e.g. with [`ProofLookup::canonical`] for
    /// campaigns whose proof files are known to use canonical keys.
    pub fn with_lookup(mut self, lookup: ProofLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn cache(&self) -> &CampaignCache<S> {
        &self.cache
    }

    /// The campaign's proof index: from the cache when usable, otherwise
    /// acquired from the proof source and written back.
    ///
    /// A malformed cache entry is discarded and re-fetched. A failed cache
    /// write is logged and the freshly acquired index is still returned.
    /// A fallback index is served but never cached, so the next call tries
    /// the candidates again.
    pub async fn index(&self) -> Result<ProofIndex, RedemptionError> {
        match self.cache.load() {
            Ok(Some(index)) => return Ok(index),
            Ok(None) => {}
            Err(RedemptionError::MalformedIndex(reason)) => {
                tracing::warn!(
                    campaign = self.cache.campaign(),
                    "discarding malformed cached proofs: {reason}"
                );
                if let Err(e) = self.cache.clear() {
                    tracing::warn!("failed to clear malformed proof cache: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("proof cache read failed, fetching instead: {e}");
            }
        }
        self.fetch_and_store().await.map(|acquired| acquired.index)
    }

    /// Make sure proofs can be served, caching them when they came from a
    /// proof source. Returns `false` when they are unavailable.
    pub async fn ensure_proofs(&self) -> bool {
        if self.cache.has_proofs() {
            return true;
        }
        match self.fetch_and_store().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(campaign = self.cache.campaign(), "proofs unavailable: {e}");
                false
            }
        }
    }

    /// Re-fetch the index regardless of what is cached.
    pub async fn refresh(&self) -> Result<Acquired, RedemptionError> {
        self.fetch_and_store().await
    }

    /// Proof for redeeming `token_ids` from `address`, or `None` when the
    /// index has no match or cannot be obtained.
    pub async fn proof_for_redemption(&self, address: &str, token_ids: &[u64]) -> Option<Proof> {
        let address = match Address::parse(address) {
            Ok(a) => a,
            Err(e) => {
                tracing::debug!("rejecting lookup: {e}");
                return None;
            }
        };
        let token_ids = TokenIds::from(token_ids.to_vec());
        let index = match self.index().await {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("proof lookup without an index: {e}");
                return None;
            }
        };
        self.lookup
            .find(&index, &address, &token_ids)
            .map(|hit| hit.proof.clone())
    }

    /// Find and verify a proof against `root`.
    pub async fn prove(
        &self,
        root: &Hash32,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Result<(String, Proof), RedemptionError> {
        let index = self.index().await?;
        let hit = self.lookup.find(&index, address, token_ids).ok_or_else(|| {
            RedemptionError::ProofNotFound {
                key: ProofKey::canonical(address, token_ids).into_string(),
            }
        })?;
        if !verify_record(root, hit.proof, address, token_ids) {
            return Err(RedemptionError::VerificationFailed {
                root: root.to_hex(),
            });
        }
        Ok((hit.key.to_string(), hit.proof.clone()))
    }

    /// Eligibility of `(address, token_ids)` under the on-chain `root`.
    pub async fn check_eligibility(
        &self,
        root: &Hash32,
        address: &Address,
        token_ids: &TokenIds,
    ) -> Eligibility {
        match self.prove(root, address, token_ids).await {
            Ok((key, proof)) => Eligibility::Eligible { key, proof },
            Err(RedemptionError::ProofNotFound { key }) => {
                tracing::debug!(%key, "not eligible: no proof");
                Eligibility::NotEligible
            }
            Err(RedemptionError::VerificationFailed { root }) => {
                tracing::debug!(%root, "not eligible: proof does not match root");
                Eligibility::NotEligible
            }
            Err(e) => {
                tracing::warn!("eligibility unknown: {e}");
                Eligibility::Unavailable
            }
        }
    }

    async fn fetch_and_store(&self) -> Result<Acquired, RedemptionError> {
        let acquired = self.source.acquire().await?;
        if acquired.origin == SourceOrigin::Fallback {
            tracing::debug!(
                campaign = self.cache.campaign(),
                "serving fallback proofs without caching them"
            );
            return Ok(acquired);
        }
        if let Err(e) = self.cache.save(&acquired.index, self.clock.now()) {
            tracing::warn!(
                campaign = self.cache.campaign(),
                "failed to persist proof index: {e}"
            );
        }
        Ok(acquired)
    }
}
