//! Proof index: composite record key → proof.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use redeem_types::{Address, TokenIds};

use crate::proof::Proof;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("proof index is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("proof index is empty")]
    Empty,

    #[error("proof index file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Canonical key of a burn record: `"{address}_{id1}_{id2}_..._{idN}"`.
///
/// The address is lowercase `0x` hex and the ids are sorted ascending, so the
/// same record always produces the same key. A record with no ids is keyed
/// by its address alone.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProofKey(String);

impl ProofKey {
    pub const SEPARATOR: char = '_';

    pub fn canonical(address: &Address, token_ids: &TokenIds) -> Self {
        if token_ids.is_empty() {
            Self(address.to_hex())
        } else {
            Self(format!(
                "{}{}{}",
                address.to_hex(),
                Self::SEPARATOR,
                token_ids.joined()
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ProofKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All proofs of one redemption campaign.
///
/// Keys are kept as raw strings: indexes built here use [`ProofKey`], but
/// indexes fetched from elsewhere may carry other key layouts, which the
/// lookup layer handles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofIndex(BTreeMap<String, Proof>);

impl ProofIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a proof, replacing and returning any previous one.
    pub fn insert(&mut self, key: impl Into<String>, proof: Proof) -> Option<Proof> {
        self.0.insert(key.into(), proof)
    }

    /// Insert only if the key is absent. Returns whether the proof was stored.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, proof: Proof) -> bool {
        match self.0.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(proof);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Proof> {
        self.0.get(key)
    }

    /// The stored key and proof, both borrowed from the index.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Proof)> {
        self.0.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_key(&self, key: &ProofKey) -> Option<&Proof> {
        self.0.get(key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Proof)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a proof source document. An empty mapping parses successfully;
    /// use [`ProofIndex::from_json_non_empty`] where emptiness is an error.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_non_empty(json: &str) -> Result<Self, IndexError> {
        let index = Self::from_json(json)?;
        if index.is_empty() {
            return Err(IndexError::Empty);
        }
        Ok(index)
    }

    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a proof file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Write a proof file (pretty-printed, keys in sorted order).
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

impl FromIterator<(String, Proof)> for ProofIndex {
    fn from_iter<I: IntoIterator<Item = (String, Proof)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redeem_types::Hash32;

    const ADDR: &str = "0x0000000000000000000000000000000000000AbC";

    #[test]
    fn canonical_key_format() {
        let addr = Address::parse(ADDR).unwrap();
        let key = ProofKey::canonical(&addr, &TokenIds::from([501, 500]));
        assert_eq!(
            key.as_str(),
            "0x0000000000000000000000000000000000000abc_500_501"
        );
    }

    #[test]
    fn canonical_key_without_ids() {
        let addr = Address::parse(ADDR).unwrap();
        let key = ProofKey::canonical(&addr, &TokenIds::default());
        assert_eq!(key.as_str(), addr.to_hex());
    }

    #[test]
    fn parse_source_document() {
        let sibling = format!("0x{}", "11".repeat(32));
        let json = format!(r#"{{"0xabc_1": ["{sibling}"], "0xdef_2": []}}"#);
        let index = ProofIndex::from_json(&json).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("0xabc_1").unwrap().siblings(),
            &[Hash32::new([0x11; 32])]
        );
        assert!(index.get("0xdef_2").unwrap().is_empty());
    }

    #[test]
    fn non_empty_parse_rejects_empty_mapping() {
        assert!(ProofIndex::from_json("{}").unwrap().is_empty());
        assert!(matches!(
            ProofIndex::from_json_non_empty("{}"),
            Err(IndexError::Empty)
        ));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(ProofIndex::from_json("[]").is_err());
        assert!(ProofIndex::from_json(r#"{"k": ["0x12"]}"#).is_err());
        assert!(ProofIndex::from_json("not json").is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proofs.json");
        let index: ProofIndex = [("0xabc_1".to_string(), Proof::new(vec![Hash32::ZERO]))]
            .into_iter()
            .collect();
        index.save(&path).unwrap();
        assert_eq!(ProofIndex::load(&path).unwrap(), index);
        assert!(matches!(
            ProofIndex::load(&dir.path().join("missing.json")),
            Err(IndexError::Io(_))
        ));
    }

    #[test]
    fn insert_if_absent_keeps_first() {
        let mut index = ProofIndex::new();
        let first = Proof::new(vec![Hash32::new([1; 32])]);
        let second = Proof::new(vec![Hash32::new([2; 32])]);
        assert!(index.insert_if_absent("k", first.clone()));
        assert!(!index.insert_if_absent("k", second));
        assert_eq!(index.get("k"), Some(&first));
    }
}
