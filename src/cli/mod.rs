//! CLI module for the combined services.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Combined services - an MCP tool server
///
/// Serves weather alerts, weather forecasts and YouTube transcripts as MCP
/// tools over stdio. Running without a subcommand starts the server.
#[derive(Parser, Debug)]
#[command(name = "combined-services")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the MCP server on stdio (default)
    Serve,

    /// Print the registered tool definitions as JSON
    Tools,

    /// Invoke a single tool and print its text result
    Call {
        /// Tool name (get_alerts, get_forecast, get_transcript)
        name: String,

        /// Tool arguments as a JSON object, e.g. '{"state": "CA"}'
        #[arg(default_value = "{}")]
        arguments: String,
    },

    /// Check external requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}
