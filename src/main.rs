//! Combined services CLI entry point.

use anyhow::Result;
use clap::Parser;
use combined_services::cli::{commands, Cli, Commands};
use combined_services::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging; stdout belongs to the JSON-RPC stream
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("combined_services={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        None | Some(Commands::Serve) => {
            commands::run_serve(&settings).await?;
        }

        Some(Commands::Tools) => {
            commands::run_tools(&settings)?;
        }

        Some(Commands::Call { name, arguments }) => {
            commands::run_call(name, arguments, &settings).await?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(config_path.as_ref(), &settings).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(action, config_path.as_ref(), &settings)?;
        }
    }

    Ok(())
}
