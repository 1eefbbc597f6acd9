//! One-shot random image fetches against the resolved API base.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Client;
use tracing::warn;

use crate::endpoint::ApiBase;

pub(crate) const RANDOM_IMAGE_PATH: &str = "/api/image/random";

/// A fetched image payload, not yet owned by the queue.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub payload: Bytes,
    pub content_type: Option<String>,
}

/// Source of single random images.
///
/// Failures are values, not errors: the fetcher never retries, and the caller
/// decides between dropping the slot and substituting a placeholder.
pub trait ImageFetcher: Send + Sync {
    fn fetch_one(&self) -> impl Future<Output = Option<FetchedImage>> + Send;
}

impl<F: ImageFetcher> ImageFetcher for Arc<F> {
    fn fetch_one(&self) -> impl Future<Output = Option<FetchedImage>> + Send {
        self.as_ref().fetch_one()
    }
}

/// Fetches from the album backend over HTTP. Requests carry no caller-imposed
/// timeout; only the startup probe is bounded.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
    base: ApiBase,
}

impl HttpImageSource {
    #[must_use]
    pub fn new(client: Client, base: ApiBase) -> Self {
        Self { client, base }
    }

    #[must_use]
    pub fn base(&self) -> &ApiBase {
        &self.base
    }
}

impl ImageFetcher for HttpImageSource {
    fn fetch_one(&self) -> impl Future<Output = Option<FetchedImage>> + Send {
        let url = self.base.join(RANDOM_IMAGE_PATH);
        let client = self.client.clone();
        async move {
            let response = match client.get(&url).send().await {
                Ok(response) => response,
                Err(err) => {
                    warn!(%url, error = %err, "image fetch failed");
                    return None;
                }
            };
            if !response.status().is_success() {
                warn!(%url, status = %response.status(), "image fetch rejected");
                return None;
            }
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            match response.bytes().await {
                Ok(payload) if payload.is_empty() => {
                    warn!(%url, "image fetch returned an empty body");
                    None
                }
                Ok(payload) => Some(FetchedImage {
                    payload,
                    content_type,
                }),
                Err(err) => {
                    warn!(%url, error = %err, "image body read failed");
                    None
                }
            }
        }
    }
}
