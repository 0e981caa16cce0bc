//! Proof document transport.

use std::future::Future;
use std::time::Duration;

use crate::error::SourceError;

/// Retrieves the raw body of a proof source document.
///
/// Implementations return `Ok` only for a successful (2xx) response; any
/// other status is a [`SourceError::Status`].
pub trait ProofFetcher: Send + Sync {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

impl<F: ProofFetcher> ProofFetcher for &F {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<String, SourceError>> + Send {
        (**self).fetch(location)
    }
}

// ── HttpFetcher ─────────────────────────────────────────────────────────

/// HTTP(S) fetcher backed by `reqwest`.
#[derive(Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| SourceError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl ProofFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String, SourceError> {
        let response = self
            .http
            .get(location)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Body(format!("failed to read body: {e}")))
    }
}
