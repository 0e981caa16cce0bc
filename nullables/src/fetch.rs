//! Nullable proof fetcher: scripted responses, no network.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use redeem_redemption::{ProofFetcher, SourceError};

/// A scripted reply for one location.
#[derive(Clone, Debug)]
pub enum NullResponse {
    /// 2xx with this body.
    Ok(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Connection-level failure.
    Unreachable,
    /// Answer only after this delay.
    Delayed(Duration, String),
}

/// A fetcher that serves scripted responses and records every request.
///
/// Locations without a script are unreachable.
pub struct NullFetcher {
    responses: Mutex<HashMap<String, NullResponse>>,
    requests: Mutex<Vec<String>>,
}

impl NullFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script the reply for `location` (builder form).
    pub fn with(self, location: &str, response: NullResponse) -> Self {
        self.respond(location, response);
        self
    }

    pub fn respond(&self, location: &str, response: NullResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(location.to_string(), response);
    }

    /// Every location requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for NullFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofFetcher for NullFetcher {
    async fn fetch(&self, location: &str) -> Result<String, SourceError> {
        self.requests.lock().unwrap().push(location.to_string());
        let response = self.responses.lock().unwrap().get(location).cloned();
        match response {
            Some(NullResponse::Ok(body)) => Ok(body),
            Some(NullResponse::Status(code)) => Err(SourceError::Status(code)),
            Some(NullResponse::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Some(NullResponse::Unreachable) | None => {
                Err(SourceError::Transport(format!("{location} unreachable")))
            }
        }
    }
}
