//! YouTube transcript tool.

use super::{parse_arguments, render, Tool, ToolDefinition, ToolFailure};
use crate::error::Result;
use crate::format::format_transcript;
use crate::gateway::TranscriptSource;
use crate::video_id::normalize;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

/// Language requested when the caller does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Transcript of a video given as URL, short link or bare ID.
#[instrument(skip(source))]
pub async fn get_transcript(source: &dyn TranscriptSource, url: &str, lang: &str) -> String {
    render(transcript(source, url, lang).await)
}

async fn transcript(
    source: &dyn TranscriptSource,
    url: &str,
    lang: &str,
) -> std::result::Result<String, ToolFailure> {
    let video = normalize(url).map_err(ToolFailure::Transcript)?;

    let lang = match lang.trim() {
        "" => DEFAULT_LANGUAGE,
        code => code,
    };

    let lines = source
        .fetch_transcript(&video, lang)
        .await
        .map_err(ToolFailure::Transcript)?;

    Ok(format_transcript(&lines))
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Deserialize)]
struct TranscriptArgs {
    url: String,
    #[serde(default = "default_language")]
    lang: String,
}

/// `get_transcript` tool.
pub struct TranscriptTool {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptTool {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for TranscriptTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_transcript".to_string(),
            description: "Extract transcript from a YouTube video URL or ID.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    },
                    "lang": {
                        "type": "string",
                        "description": "Language code for transcript",
                        "default": DEFAULT_LANGUAGE
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String> {
        let args: TranscriptArgs = parse_arguments("get_transcript", arguments)?;
        Ok(get_transcript(self.source.as_ref(), &args.url, &args.lang).await)
    }
}
