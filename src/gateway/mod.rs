//! Outbound calls to the third-party data sources.
//!
//! HTTP requests go through a [`JsonFetcher`], whose contract is to never
//! fail outward: any transport error, non-2xx status, timeout or malformed
//! body collapses to `None`. Transcript lookups go through a
//! [`TranscriptSource`], which does report a diagnostic on failure.

mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod transcript;
mod weather;

pub use http::HttpFetcher;
pub use transcript::{TranscriptLine, TranscriptSource, YtDlpTranscriptSource};
pub use weather::{WeatherGateway, NWS_API_BASE, USER_AGENT};

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Timeout applied to every outbound HTTP call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// One outbound GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl UpstreamRequest {
    /// Create a request with no headers and the fixed upstream timeout.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    /// Add a request header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Parsed JSON payload, or `None` when the upstream call failed in any way.
pub type UpstreamResult = Option<Value>;

/// Fetches JSON documents over HTTP.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Perform the request. Never returns an error; failure is `None`.
    async fn fetch_json(&self, request: &UpstreamRequest) -> UpstreamResult;
}
