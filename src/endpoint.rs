//! Startup endpoint selection.
//!
//! Candidates are probed in priority order with a bounded liveness request;
//! the first success is committed for the whole session. Resolution is never
//! re-run on later fetch failures.

use std::time::Duration;

use reqwest::Client;
use tokio::time::timeout;
use tracing::{info, warn};

pub(crate) const PROBE_PATH: &str = "/api/config";

/// Resolved API base address. An empty base means "same-origin relative": in a
/// reverse-proxied deployment requests go to whatever host served the client;
/// anywhere else each image fetch just fails on its own and is recovered
/// per-slot, matching the error taxonomy for an unreachable source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiBase(String);

impl ApiBase {
    #[must_use]
    pub fn relative() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0.trim_end_matches('/'), path)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Probe `candidates` in order and commit to the first one whose probe returns
/// a success status within `probe_timeout`. A timed-out probe is cancelled and
/// counted as a failure, not retried. Falls back to the relative base when the
/// list is empty or exhausted.
pub async fn resolve(client: &Client, candidates: &[String], probe_timeout: Duration) -> ApiBase {
    for candidate in candidates {
        let base = ApiBase::new(candidate.trim_end_matches('/'));
        if probe(client, &base, probe_timeout).await {
            info!(base = %base.as_str(), "endpoint probe succeeded; committing");
            return base;
        }
        warn!(base = %base.as_str(), "endpoint probe failed");
    }
    info!("no candidate endpoint reachable; using same-origin relative base");
    ApiBase::relative()
}

async fn probe(client: &Client, base: &ApiBase, probe_timeout: Duration) -> bool {
    let url = base.join(PROBE_PATH);
    match timeout(probe_timeout, client.get(&url).send()).await {
        Ok(Ok(response)) => response.status().is_success(),
        Ok(Err(_)) | Err(_) => false,
    }
}
