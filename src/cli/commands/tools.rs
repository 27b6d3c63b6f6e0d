//! Tools command implementation.

use crate::config::Settings;
use crate::tools::ToolRegistry;
use anyhow::Result;

/// Print the tool definitions as pretty JSON.
pub fn run_tools(settings: &Settings) -> Result<()> {
    let registry = ToolRegistry::standard(settings);
    println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
    Ok(())
}
