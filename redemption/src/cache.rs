//! Campaign-scoped proof cache over an injected key/value store.
//!
//! Two entries per campaign:
//! - `redeem:{campaign}:proofs`: the serialized proof index
//! - `redeem:{campaign}:loaded_at`: RFC 3339 time the index was stored

use chrono::{DateTime, SecondsFormat, Utc};

use redeem_merkle::ProofIndex;
use redeem_store::{KeyValueStore, StoreError};
use redeem_types::Timestamp;

use crate::error::RedemptionError;

const NAMESPACE: &str = "redeem";

/// Snapshot of what the cache holds for a campaign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStatus {
    pub campaign: String,
    pub entries: Option<usize>,
    pub loaded_at: Option<Timestamp>,
}

impl CacheStatus {
    pub fn is_present(&self) -> bool {
        self.entries.is_some_and(|n| n > 0)
    }
}

pub struct CampaignCache<S> {
    store: S,
    campaign: String,
}

impl<S: KeyValueStore> CampaignCache<S> {
    pub fn new(store: S, campaign: impl Into<String>) -> Self {
        Self {
            store,
            campaign: campaign.into(),
        }
    }

    pub fn campaign(&self) -> &str {
        &self.campaign
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn proofs_key(&self) -> String {
        format!("{NAMESPACE}:{}:proofs", self.campaign)
    }

    pub fn loaded_at_key(&self) -> String {
        format!("{NAMESPACE}:{}:loaded_at", self.campaign)
    }

    /// The cached index, `None` when nothing is cached.
    ///
    /// A cached value that is not a non-empty proof mapping is
    /// [`RedemptionError::MalformedIndex`].
    pub fn load(&self) -> Result<Option<ProofIndex>, RedemptionError> {
        let Some(raw) = self.store.get(&self.proofs_key())? else {
            return Ok(None);
        };
        ProofIndex::from_json_non_empty(&raw)
            .map(Some)
            .map_err(|e| RedemptionError::MalformedIndex(e.to_string()))
    }

    /// Whether a usable index is cached. Never fails: any read or parse
    /// problem reads as "not present".
    pub fn has_proofs(&self) -> bool {
        match self.load() {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                tracing::debug!(campaign = %self.campaign, "cached proofs unusable: {e}");
                false
            }
        }
    }

    /// Store an index together with its retrieval time.
    ///
    /// Both entries are written or neither is: when the timestamp cannot be
    /// stored, the freshly written index is removed again.
    pub fn save(&self, index: &ProofIndex, at: Timestamp) -> Result<(), StoreError> {
        let json = index
            .to_json()
            .map_err(|e| StoreError::Backend(format!("failed to serialize proof index: {e}")))?;
        self.store.set(&self.proofs_key(), &json)?;
        if let Err(e) = self.store.set(&self.loaded_at_key(), &format_rfc3339(at)) {
            if let Err(cleanup) = self.store.remove(&self.proofs_key()) {
                tracing::warn!(
                    campaign = %self.campaign,
                    "failed to roll back proof cache: {cleanup}"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.proofs_key())?;
        self.store.remove(&self.loaded_at_key())?;
        Ok(())
    }

    /// When the cached index was stored. An unparseable timestamp reads as `None`.
    pub fn loaded_at(&self) -> Result<Option<Timestamp>, StoreError> {
        Ok(self
            .store
            .get(&self.loaded_at_key())?
            .and_then(|raw| parse_rfc3339(&raw)))
    }

    pub fn status(&self) -> CacheStatus {
        let entries = self.load().ok().flatten().map(|index| index.len());
        let loaded_at = self.loaded_at().ok().flatten();
        CacheStatus {
            campaign: self.campaign.clone(),
            entries,
            loaded_at,
        }
    }
}

pub fn format_rfc3339(at: Timestamp) -> String {
    let secs = i64::try_from(at.as_secs()).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse_rfc3339(raw: &str) -> Option<Timestamp> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    u64::try_from(parsed.timestamp()).ok().map(Timestamp::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_formatting() {
        assert_eq!(format_rfc3339(Timestamp::EPOCH), "1970-01-01T00:00:00Z");
        assert_eq!(
            format_rfc3339(Timestamp::new(1_792_368_000)),
            "2026-10-19T00:00:00Z"
        );
    }

    #[test]
    fn rfc3339_parsing_accepts_offsets() {
        assert_eq!(
            parse_rfc3339("2026-10-19T02:00:00+02:00"),
            Some(Timestamp::new(1_792_368_000))
        );
        assert_eq!(parse_rfc3339("yesterday"), None);
        assert_eq!(parse_rfc3339("1969-12-31T23:59:59Z"), None);
    }
}
