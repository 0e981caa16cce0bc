//! Top-level error type shared across crates.

use thiserror::Error;

/// Parse errors for the fundamental types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid token id: {0}")]
    InvalidTokenId(String),
}
