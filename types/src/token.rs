//! Normalized token-id sets.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A sorted, deduplicated set of burned token ids.
///
/// Every constructor normalizes, so two sets holding the same ids compare
/// equal and hash to the same leaf regardless of input order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TokenIds(Vec<u64>);

impl TokenIds {
    pub fn new(mut ids: Vec<u64>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Ids joined with `_`, e.g. `"500_501"`.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl FromIterator<u64> for TokenIds {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<u64>> for TokenIds {
    fn from(ids: Vec<u64>) -> Self {
        Self::new(ids)
    }
}

impl<const N: usize> From<[u64; N]> for TokenIds {
    fn from(ids: [u64; N]) -> Self {
        Self::new(ids.to_vec())
    }
}

impl fmt::Display for TokenIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.joined().replace('_', ", "))
    }
}

/// Generators emit ids either as JSON numbers or as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTokenId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for TokenIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<RawTokenId>::deserialize(deserializer)?;
        let ids = raw
            .into_iter()
            .map(|id| match id {
                RawTokenId::Number(n) => Ok(n),
                RawTokenId::Text(s) => s.trim().parse::<u64>().map_err(|e| {
                    serde::de::Error::custom(format!("invalid token id {s:?}: {e}"))
                }),
            })
            .collect::<Result<Vec<_>, D::Error>>()?;
        Ok(Self::new(ids))
    }
}
