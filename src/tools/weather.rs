//! Weather alert and forecast tools.

use super::{parse_arguments, render, Tool, ToolDefinition, ToolFailure};
use crate::error::Result;
use crate::format::{format_alert, format_forecast, join_blocks};
use crate::gateway::WeatherGateway;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

/// Answer for a state with an empty alert list.
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";

/// Active alerts for a US state.
#[instrument(skip(gateway))]
pub async fn get_alerts(gateway: &WeatherGateway, state: &str) -> String {
    render(alerts(gateway, state).await)
}

async fn alerts(gateway: &WeatherGateway, state: &str) -> std::result::Result<String, ToolFailure> {
    let payload = gateway
        .active_alerts(state)
        .await
        .ok_or(ToolFailure::AlertsUnavailable)?;

    let features = payload
        .get("features")
        .and_then(Value::as_array)
        .ok_or(ToolFailure::AlertsUnavailable)?;

    if features.is_empty() {
        return Ok(NO_ACTIVE_ALERTS.to_string());
    }

    Ok(join_blocks(features.iter().map(format_alert)))
}

/// Forecast for a coordinate: resolve the grid forecast URL, then fetch it.
#[instrument(skip(gateway))]
pub async fn get_forecast(gateway: &WeatherGateway, latitude: f64, longitude: f64) -> String {
    render(forecast(gateway, latitude, longitude).await)
}

async fn forecast(
    gateway: &WeatherGateway,
    latitude: f64,
    longitude: f64,
) -> std::result::Result<String, ToolFailure> {
    let points = gateway
        .points(latitude, longitude)
        .await
        .ok_or(ToolFailure::LocationUnavailable)?;

    // Without a forecast URL there is nothing to fetch next.
    let forecast_url = points
        .pointer("/properties/forecast")
        .and_then(Value::as_str)
        .ok_or(ToolFailure::LocationUnavailable)?;

    let forecast = gateway
        .forecast(forecast_url)
        .await
        .ok_or(ToolFailure::ForecastUnavailable)?;

    let periods = forecast
        .pointer("/properties/periods")
        .and_then(Value::as_array)
        .ok_or(ToolFailure::ForecastUnavailable)?;

    Ok(format_forecast(periods))
}

#[derive(Debug, Deserialize)]
struct AlertsArgs {
    state: String,
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    latitude: f64,
    longitude: f64,
}

/// `get_alerts` tool.
pub struct AlertsTool {
    gateway: WeatherGateway,
}

impl AlertsTool {
    pub fn new(gateway: WeatherGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for AlertsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_alerts".to_string(),
            description: "Get active weather alerts for a specific state.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "state": {
                        "type": "string",
                        "description": "Two-letter US state code (e.g. CA, NY)"
                    }
                },
                "required": ["state"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String> {
        let args: AlertsArgs = parse_arguments("get_alerts", arguments)?;
        Ok(get_alerts(&self.gateway, &args.state).await)
    }
}

/// `get_forecast` tool.
pub struct ForecastTool {
    gateway: WeatherGateway,
}

impl ForecastTool {
    pub fn new(gateway: WeatherGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ForecastTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_forecast".to_string(),
            description: "Get weather forecast for a location.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "Latitude of the location"
                    },
                    "longitude": {
                        "type": "number",
                        "description": "Longitude of the location"
                    }
                },
                "required": ["latitude", "longitude"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String> {
        let args: ForecastArgs = parse_arguments("get_forecast", arguments)?;
        Ok(get_forecast(&self.gateway, args.latitude, args.longitude).await)
    }
}
