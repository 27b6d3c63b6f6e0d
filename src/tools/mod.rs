//! Tool dispatch.
//!
//! A [`ToolRegistry`] is built once at startup and never mutated. Each tool
//! declares a JSON schema and answers every invocation with plain text:
//! failures of the underlying data sources are absorbed into text by
//! [`render`], the single place where a [`ToolFailure`] becomes a message.
//! Only malformed invocations (unknown tool, arguments not matching the
//! schema) surface as errors, and those are the transport's to report.

mod transcript;
mod weather;

pub use transcript::{get_transcript, TranscriptTool};
pub use weather::{get_alerts, get_forecast, AlertsTool, ForecastTool, NO_ACTIVE_ALERTS};

use crate::config::Settings;
use crate::error::{Result, ServiceError};
use crate::gateway::{HttpFetcher, WeatherGateway, YtDlpTranscriptSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Name, description and input schema advertised for a tool.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// One incoming call: a registered tool name and its arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments: Some(arguments),
        }
    }
}

/// A named operation invocable by the host runtime.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Definition advertised to callers.
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Returns `Err` only when `arguments` do not fit the schema.
    async fn call(&self, arguments: Value) -> Result<String>;
}

/// Data-source failures a tool turns into its text answer.
#[derive(Debug, Error)]
pub enum ToolFailure {
    #[error("Unable to fetch alerts or no alerts found.")]
    AlertsUnavailable,

    #[error("Unable to fetch forecast data for this location.")]
    LocationUnavailable,

    #[error("Unable to fetch detailed forecast.")]
    ForecastUnavailable,

    #[error("Failed to retrieve transcript: {0}")]
    Transcript(ServiceError),
}

/// Collapse a tool outcome into the text returned to the caller.
pub fn render(outcome: std::result::Result<String, ToolFailure>) -> String {
    outcome.unwrap_or_else(|failure| {
        debug!(?failure, "Tool call absorbed a failure");
        failure.to_string()
    })
}

/// Deserialize tool arguments, reporting schema mismatches by tool name.
pub(crate) fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| ServiceError::InvalidArguments(format!("{}: {}", tool, e)))
}

/// A tool together with the definition captured at registration.
struct RegisteredTool {
    definition: ToolDefinition,
    tool: Arc<dyn Tool>,
}

/// Immutable name → tool table.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Registry with the weather and transcript tools wired to real upstreams.
    pub fn standard(settings: &Settings) -> Self {
        let weather = WeatherGateway::with_endpoint(
            Arc::new(HttpFetcher::new()),
            &settings.weather.base_url,
            &settings.weather.user_agent,
        );
        let transcripts = YtDlpTranscriptSource::with_binary(
            settings.ytdlp_path(),
            settings.transcript_timeout(),
        );

        Self::builder()
            .register(AlertsTool::new(weather.clone()))
            .register(ForecastTool::new(weather))
            .register(TranscriptTool::new(Arc::new(transcripts)))
            .build()
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|t| t.definition.name == name)
            .map(|t| Arc::clone(&t.tool))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Route an invocation to its tool.
    #[instrument(skip(self, invocation), fields(tool = %invocation.name))]
    pub async fn invoke(&self, invocation: ToolInvocation) -> Result<String> {
        let tool = self
            .get(&invocation.name)
            .ok_or_else(|| ServiceError::UnknownTool(invocation.name.clone()))?;

        let arguments = invocation
            .arguments
            .unwrap_or_else(|| Value::Object(Default::default()));

        let text = tool.call(arguments).await?;
        info!(chars = text.len(), "Tool call finished");
        Ok(text)
    }
}

/// Collects tools before the registry is frozen.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    /// Add a tool. A later tool with the same name replaces the earlier one.
    pub fn register(mut self, tool: impl Tool + 'static) -> Self {
        let definition = tool.definition();
        self.tools.retain(|t| t.definition.name != definition.name);
        self.tools.push(RegisteredTool {
            definition,
            tool: Arc::new(tool),
        });
        self
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{FakeFetcher, FakeTranscripts};
    use serde_json::json;

    fn registry() -> ToolRegistry {
        let weather = WeatherGateway::new(Arc::new(FakeFetcher::new().respond(
            "https://api.weather.gov/alerts/active/area/TX",
            json!({"features": []}),
        )));

        ToolRegistry::builder()
            .register(AlertsTool::new(weather.clone()))
            .register(ForecastTool::new(weather))
            .register(TranscriptTool::new(Arc::new(FakeTranscripts::lines(&["hi"]))))
            .build()
    }

    #[test]
    fn test_definitions_in_registration_order() {
        let names: Vec<String> = registry().definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["get_alerts", "get_forecast", "get_transcript"]);
    }

    #[test]
    fn test_definition_serializes_camel_case() {
        let definition = registry().get("get_alerts").unwrap().definition();
        let value = serde_json::to_value(definition).unwrap();
        assert_eq!(value["inputSchema"]["required"], json!(["state"]));
    }

    #[test]
    fn test_builder_replaces_duplicate_names() {
        let fetcher = Arc::new(FakeFetcher::new());
        let registry = ToolRegistry::builder()
            .register(AlertsTool::new(WeatherGateway::new(fetcher.clone())))
            .register(AlertsTool::new(WeatherGateway::new(fetcher)))
            .build();
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_routes_by_name() {
        let text = registry()
            .invoke(ToolInvocation::new("get_alerts", json!({"state": "TX"})))
            .await
            .unwrap();
        assert_eq!(text, NO_ACTIVE_ALERTS);
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let err = registry()
            .invoke(ToolInvocation::new("get_tides", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownTool(name) if name == "get_tides"));
    }

    #[tokio::test]
    async fn test_invoke_rejects_arguments_outside_schema() {
        let registry = registry();

        let missing = ToolInvocation {
            name: "get_alerts".to_string(),
            arguments: None,
        };
        assert!(matches!(
            registry.invoke(missing).await,
            Err(ServiceError::InvalidArguments(_))
        ));

        let wrong_type = ToolInvocation::new("get_forecast", json!({"latitude": "north", "longitude": 1.0}));
        assert!(matches!(
            registry.invoke(wrong_type).await,
            Err(ServiceError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_render_maps_failures_to_fixed_text() {
        assert_eq!(render(Ok("text".to_string())), "text");
        assert_eq!(
            render(Err(ToolFailure::AlertsUnavailable)),
            "Unable to fetch alerts or no alerts found."
        );
        assert_eq!(
            render(Err(ToolFailure::LocationUnavailable)),
            "Unable to fetch forecast data for this location."
        );
        assert_eq!(
            render(Err(ToolFailure::ForecastUnavailable)),
            "Unable to fetch detailed forecast."
        );
        assert_eq!(
            render(Err(ToolFailure::Transcript(ServiceError::TranscriptUnavailable(
                "no captions".to_string()
            )))),
            "Failed to retrieve transcript: no captions"
        );
    }
}
