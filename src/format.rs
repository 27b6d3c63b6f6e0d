//! Text rendering of upstream payloads.
//!
//! Every function here is pure and infallible: a missing or `null` field is
//! replaced by a fixed placeholder through [`field_or`], one field at a time.

use crate::gateway::TranscriptLine;
use serde_json::Value;

/// Separator between formatted blocks (alerts, forecast periods).
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Number of forecast periods rendered; later periods are dropped.
pub const FORECAST_WINDOW: usize = 5;

const UNKNOWN: &str = "Unknown";

/// Text of `object[key]`, or `default` when the field is absent or `null`.
///
/// Strings are taken verbatim; other scalars use their JSON rendering.
pub fn field_or(object: &Value, key: &str, default: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Join formatted blocks with [`BLOCK_SEPARATOR`].
pub fn join_blocks(blocks: impl IntoIterator<Item = String>) -> String {
    blocks.into_iter().collect::<Vec<_>>().join(BLOCK_SEPARATOR)
}

/// Render one NWS alert feature.
pub fn format_alert(feature: &Value) -> String {
    let props = feature.get("properties").unwrap_or(&Value::Null);

    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        field_or(props, "event", UNKNOWN),
        field_or(props, "areaDesc", UNKNOWN),
        field_or(props, "severity", UNKNOWN),
        field_or(props, "description", "No description available"),
        field_or(props, "instruction", "No specific instructions provided"),
    )
}

/// Render one NWS forecast period.
pub fn format_period(period: &Value) -> String {
    format!(
        "\n{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}\n",
        field_or(period, "name", UNKNOWN),
        field_or(period, "temperature", UNKNOWN),
        field_or(period, "temperatureUnit", ""),
        field_or(period, "windSpeed", UNKNOWN),
        field_or(period, "windDirection", ""),
        field_or(period, "detailedForecast", "No forecast available"),
    )
}

/// Render the first [`FORECAST_WINDOW`] periods in supplied order.
pub fn format_forecast(periods: &[Value]) -> String {
    join_blocks(periods.iter().take(FORECAST_WINDOW).map(format_period))
}

/// Trim each line, drop empty ones and join the rest with single spaces.
pub fn format_transcript(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
