//! Serve command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::tools::ToolRegistry;
use anyhow::Result;

/// Run the MCP server until stdin is closed.
pub async fn run_serve(settings: &Settings) -> Result<()> {
    let server = McpServer::new(ToolRegistry::standard(settings));
    server.run().await
}
