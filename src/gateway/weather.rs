//! National Weather Service call sites.

use super::{JsonFetcher, UpstreamRequest, UpstreamResult};
use std::sync::Arc;
use tracing::{instrument, warn};
use url::Url;

/// Base URL of the NWS API.
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// User agent the NWS API requires on every request.
pub const USER_AGENT: &str = "weather-app/1.0";

const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// Builds NWS requests and hands them to a [`JsonFetcher`].
#[derive(Clone)]
pub struct WeatherGateway {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    user_agent: String,
}

impl WeatherGateway {
    /// Gateway against the public NWS API.
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self::with_endpoint(fetcher, NWS_API_BASE, USER_AGENT)
    }

    /// Gateway against a custom base URL and user agent.
    pub fn with_endpoint(fetcher: Arc<dyn JsonFetcher>, base_url: &str, user_agent: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Option<String> {
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(base_url = %self.base_url, "Invalid NWS base URL: {}", e);
                return None;
            }
        };

        {
            let Ok(mut path) = url.path_segments_mut() else {
                warn!(base_url = %self.base_url, "NWS base URL cannot take a path");
                return None;
            };
            path.pop_if_empty().extend(segments);
        }

        Some(url.into())
    }

    fn request(&self, url: String) -> UpstreamRequest {
        UpstreamRequest::get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", ACCEPT_GEO_JSON)
    }

    /// `GET /alerts/active/area/{state}`; payload carries a `features` list.
    #[instrument(skip(self))]
    pub async fn active_alerts(&self, state: &str) -> UpstreamResult {
        let url = self.endpoint(&["alerts", "active", "area", state.trim()])?;
        self.fetcher.fetch_json(&self.request(url)).await
    }

    /// `GET /points/{lat},{lon}`; payload carries `properties.forecast`.
    #[instrument(skip(self))]
    pub async fn points(&self, latitude: f64, longitude: f64) -> UpstreamResult {
        let location = format!("{},{}", latitude, longitude);
        let url = self.endpoint(&["points", &location])?;
        self.fetcher.fetch_json(&self.request(url)).await
    }

    /// `GET <forecast_url>` as resolved by [`Self::points`].
    #[instrument(skip(self))]
    pub async fn forecast(&self, forecast_url: &str) -> UpstreamResult {
        self.fetcher
            .fetch_json(&self.request(forecast_url.to_string()))
            .await
    }
}
