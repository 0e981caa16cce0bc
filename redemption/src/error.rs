use std::time::Duration;

use thiserror::Error;

use redeem_store::StoreError;

/// Why a single proof source candidate was rejected.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("source returned HTTP {0}")]
    Status(u16),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("unusable proof document: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum RedemptionError {
    /// Every candidate failed and the fallback index is empty.
    #[error("proof source unavailable after {attempts} candidate(s)")]
    SourceUnavailable { attempts: usize },

    #[error("no matching proof for {key}")]
    ProofNotFound { key: String },

    #[error("proof does not reproduce root {root}")]
    VerificationFailed { root: String },

    /// The cached index does not parse to a non-empty mapping.
    #[error("cached proof index is malformed: {0}")]
    MalformedIndex(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
