//! MCP (Model Context Protocol) server.
//!
//! Exposes the tool registry to an MCP host such as Claude Desktop.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;

pub use server::McpServer;
