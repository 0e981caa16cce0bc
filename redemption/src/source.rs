//! Proof source acquisition.
//!
//! Candidates are tried strictly in order and the first usable document
//! wins; sources are never merged. Each attempt is bounded by its own
//! timeout, and a slow candidate is skipped exactly like a failing one.

use std::time::Duration;

use redeem_merkle::ProofIndex;

use crate::error::{RedemptionError, SourceError};
use crate::fetch::ProofFetcher;

/// Where an acquired index came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOrigin {
    Network(String),
    Fallback,
}

#[derive(Clone, Debug)]
pub struct Acquired {
    pub index: ProofIndex,
    pub origin: SourceOrigin,
}

pub struct ProofSource<F> {
    fetcher: F,
    candidates: Vec<String>,
    timeout: Duration,
    fallback: ProofIndex,
}

impl<F: ProofFetcher> ProofSource<F> {
    pub fn new(fetcher: F, candidates: Vec<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            candidates,
            timeout,
            fallback: ProofIndex::new(),
        }
    }

    /// Index substituted when every candidate fails.
    pub fn with_fallback(mut self, fallback: ProofIndex) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Fetch the first usable index, or fall back.
    ///
    /// A candidate is usable when it answers 2xx within the timeout with a
    /// body that parses to a non-empty proof mapping.
    pub async fn acquire(&self) -> Result<Acquired, RedemptionError> {
        for location in &self.candidates {
            match self.try_candidate(location).await {
                Ok(index) => {
                    tracing::info!(
                        source = %location,
                        entries = index.len(),
                        "loaded proof index"
                    );
                    return Ok(Acquired {
                        index,
                        origin: SourceOrigin::Network(location.clone()),
                    });
                }
                Err(e) => {
                    tracing::debug!(source = %location, "proof source candidate rejected: {e}");
                }
            }
        }

        if self.fallback.is_empty() {
            tracing::warn!(
                attempts = self.candidates.len(),
                "no proof source reachable and no fallback available"
            );
            return Err(RedemptionError::SourceUnavailable {
                attempts: self.candidates.len(),
            });
        }

        tracing::warn!(
            attempts = self.candidates.len(),
            entries = self.fallback.len(),
            "all proof sources failed, using fallback index"
        );
        Ok(Acquired {
            index: self.fallback.clone(),
            origin: SourceOrigin::Fallback,
        })
    }

    async fn try_candidate(&self, location: &str) -> Result<ProofIndex, SourceError> {
        let body = tokio::time::timeout(self.timeout, self.fetcher.fetch(location))
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))??;
        ProofIndex::from_json_non_empty(&body).map_err(|e| SourceError::Body(e.to_string()))
    }
}
