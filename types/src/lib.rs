//! Fundamental types for burn-redemption proofs.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! EVM addresses, 32-byte hashes, normalized token-id sets, burn records, and timestamps.

pub mod address;
pub mod error;
pub mod hash;
pub mod record;
pub mod time;
pub mod token;

pub use address::Address;
pub use error::TypesError;
pub use hash::Hash32;
pub use record::BurnRecord;
pub use time::Timestamp;
pub use token::TokenIds;
