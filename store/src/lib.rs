//! Abstract storage trait for burn-redemption proofs.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`KeyValueStore`]. The rest of the codebase depends only on the trait and
//! receives a store by injection; nothing reaches for ambient global storage.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KeyValueStore;
