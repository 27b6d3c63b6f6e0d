//! reqwest-backed [`JsonFetcher`].

use super::{JsonFetcher, UpstreamRequest, UpstreamResult};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// HTTP fetcher that opens a fresh client per call.
///
/// The client (and its connection pool) lives only for the duration of one
/// request and is dropped on every exit path.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    pub fn new() -> Self {
        Self
    }

    async fn try_fetch(request: &UpstreamRequest) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(request.timeout)
            .build()?;

        let mut builder = client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?.error_for_status()?;
        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn fetch_json(&self, request: &UpstreamRequest) -> UpstreamResult {
        match Self::try_fetch(request).await {
            Ok(payload) => {
                debug!("Upstream request succeeded");
                Some(payload)
            }
            Err(e) => {
                warn!("Upstream request failed: {}", e);
                None
            }
        }
    }
}
