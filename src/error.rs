//! Error types for the combined services.

use thiserror::Error;

/// Library-level error type.
///
/// None of these cross the tool boundary as structured errors: the tool layer
/// renders them as text (see [`crate::tools::ToolFailure`]).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    TranscriptUnavailable(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
