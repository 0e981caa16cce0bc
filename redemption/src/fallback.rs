//! Fallback proof index compiled into the binary.
//!
//! Used when every configured proof source fails, so a redemption flow can
//! still serve the holders it covers instead of failing outright.

use std::path::Path;

use redeem_merkle::ProofIndex;

use crate::error::SourceError;

const EMBEDDED_FALLBACK: &str = include_str!("../data/fallback_proofs.json");

/// Root the embedded fallback proofs were generated against.
pub const EMBEDDED_FALLBACK_ROOT: &str =
    "0x32796315855bb07d1458095ea08405876ae444fdbe966a2596cbc465f355c464";

/// The embedded fallback index. A corrupt embedded document yields an empty
/// index, which acquisition treats as "no fallback".
pub fn embedded() -> ProofIndex {
    ProofIndex::from_json(EMBEDDED_FALLBACK).unwrap_or_else(|e| {
        tracing::error!("embedded fallback proofs are unreadable: {e}");
        ProofIndex::new()
    })
}

/// Load a fallback index from a JSON file.
pub fn from_file(path: &Path) -> Result<ProofIndex, SourceError> {
    ProofIndex::load(path).map_err(|e| SourceError::Body(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use redeem_merkle::verify_hex;

    #[test]
    fn embedded_index_is_populated() {
        assert_eq!(embedded().len(), 4);
    }

    #[test]
    fn embedded_proofs_verify_against_their_root() {
        for (key, proof) in embedded().iter() {
            let mut parts = key.split('_');
            let address = parts.next().unwrap();
            let ids: Vec<u64> = parts.map(|p| p.parse().unwrap()).collect();
            assert!(
                verify_hex(EMBEDDED_FALLBACK_ROOT, &proof.to_hex(), address, &ids),
                "fallback proof for {key} does not verify"
            );
        }
    }

    #[test]
    fn from_file_reads_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fallback.json");
        std::fs::write(&path, r#"{"0xabc_1": []}"#).unwrap();
        let index = from_file(&path).unwrap();
        assert!(index.contains_key("0xabc_1"));
    }

    #[test]
    fn from_file_missing_is_error() {
        assert!(from_file(Path::new("/no/such/fallback.json")).is_err());
    }
}
