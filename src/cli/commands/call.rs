//! Call command implementation.

use crate::config::Settings;
use crate::tools::{ToolInvocation, ToolRegistry};
use anyhow::{Context, Result};
use serde_json::Value;

/// Invoke one tool through the standard registry and print its text.
pub async fn run_call(name: &str, arguments: &str, settings: &Settings) -> Result<()> {
    let arguments: Value = serde_json::from_str(arguments)
        .with_context(|| format!("Tool arguments are not valid JSON: {}", arguments))?;

    let registry = ToolRegistry::standard(settings);
    let text = registry.invoke(ToolInvocation::new(name, arguments)).await?;
    println!("{}", text);

    Ok(())
}
