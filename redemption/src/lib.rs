//! Burn-redemption proof handling.
//!
//! Provides everything a redemption flow needs on top of the Merkle layer:
//! - Proof source acquisition: ordered candidate fetches with a per-candidate
//!   timeout and an embedded fallback index
//! - A campaign-scoped cache over an injected [`redeem_store::KeyValueStore`]
//! - Proof lookup by canonical key, with a labelled shim for legacy key layouts
//! - The [`Redeemer`] facade tying it together into eligibility checks

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod legacy;
pub mod lookup;
pub mod redeemer;
pub mod source;

pub use cache::{CacheStatus, CampaignCache};
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, RedeemConfig};
pub use error::{RedemptionError, SourceError};
pub use fetch::{HttpFetcher, ProofFetcher};
pub use legacy::LegacyKeyMatcher;
pub use lookup::{CanonicalMatcher, KeyMatcher, LookupHit, MatchStrategy, ProofLookup};
pub use redeemer::{Eligibility, Redeemer};
pub use source::{Acquired, ProofSource, SourceOrigin};
