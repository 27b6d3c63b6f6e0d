//! Combined services - weather and transcript tools over MCP
//!
//! An MCP (Model Context Protocol) server exposing three tools to an
//! orchestrating assistant:
//!
//! - `get_alerts` - active National Weather Service alerts for a US state
//! - `get_forecast` - the next five forecast periods for a coordinate
//! - `get_transcript` - the caption text of a YouTube video
//!
//! Every tool answers with plain text. Upstream failures (timeouts, HTTP
//! errors, malformed payloads, unusable video references) are rendered as
//! fixed human-readable messages instead of protocol errors.
//!
//! # Architecture
//!
//! - `video_id` - normalization of video URLs, short links and bare IDs
//! - `gateway` - outbound HTTP (weather) and yt-dlp (transcripts) calls
//! - `format` - rendering of upstream payloads into text blocks
//! - `tools` - tool definitions, the immutable registry and dispatch
//! - `mcp` - JSON-RPC 2.0 transport over stdio
//! - `config` - TOML configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use combined_services::config::Settings;
//! use combined_services::tools::{ToolInvocation, ToolRegistry};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = ToolRegistry::standard(&Settings::default());
//!
//!     let text = registry
//!         .invoke(ToolInvocation::new("get_alerts", json!({"state": "CA"})))
//!         .await?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod mcp;
pub mod tools;
pub mod video_id;

pub use error::{Result, ServiceError};
