//! Transcript retrieval.
//!
//! Captions are fetched with yt-dlp in the `json3` subtitle format, which
//! carries one event per caption cue with its text split into segments.

use crate::error::{Result, ServiceError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Default wall-clock limit for one transcript lookup.
pub const DEFAULT_TRANSCRIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// A single language tag such as `en`, `pt-BR` or `zh-Hans`.
///
/// yt-dlp reads `--sub-langs` as a comma-separated list of regexes with `all`
/// and `-` exclusions, so anything beyond a plain tag is refused.
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("Invalid regex"));

fn check_language(language: &str) -> Result<()> {
    if language != "all" && LANGUAGE_PATTERN.is_match(language) {
        Ok(())
    } else {
        Err(ServiceError::UnsupportedLanguage(language.to_string()))
    }
}

/// One caption line as supplied upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Caption text, untrimmed.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Display duration in seconds.
    pub duration_seconds: f64,
}

impl TranscriptLine {
    pub fn new(text: String, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text,
            start_seconds,
            duration_seconds,
        }
    }
}

/// Provider of caption lines for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for `video` in `language` (e.g. `en`).
    ///
    /// Lines are returned in the order the provider supplies them.
    async fn fetch_transcript(&self, video: &VideoId, language: &str) -> Result<Vec<TranscriptLine>>;
}

/// Transcript source backed by the `yt-dlp` binary.
#[derive(Debug, Clone)]
pub struct YtDlpTranscriptSource {
    binary: PathBuf,
    timeout: Duration,
}

impl YtDlpTranscriptSource {
    /// Use `yt-dlp` from `PATH`.
    pub fn new() -> Self {
        Self::with_binary("yt-dlp", DEFAULT_TRANSCRIPT_TIMEOUT)
    }

    pub fn with_binary(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn download_captions(&self, video: &VideoId, language: &str, dir: &Path) -> Result<()> {
        let template = dir.join("%(id)s.%(ext)s");

        let run = Command::new(&self.binary)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs").arg(language)
            .arg("--sub-format").arg("json3")
            .arg("--output").arg(&template)
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(video.watch_url())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let result = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| ServiceError::Timeout(self.timeout.as_secs()))?;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ServiceError::ToolNotFound(self.binary.display().to_string()));
            }
            Err(e) => {
                return Err(ServiceError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::ToolFailed(format!("yt-dlp failed: {}", stderr.trim())));
        }

        Ok(())
    }
}

impl Default for YtDlpTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptSource {
    #[instrument(skip(self), fields(video_id = %video))]
    async fn fetch_transcript(&self, video: &VideoId, language: &str) -> Result<Vec<TranscriptLine>> {
        check_language(language)?;

        let workdir = tempfile::Builder::new()
            .prefix("combined-services-")
            .tempdir()?;

        info!("Fetching captions");
        self.download_captions(video, language, workdir.path()).await?;

        let content = read_caption_file(workdir.path(), video, language)
            .await?
            .ok_or_else(|| {
                ServiceError::TranscriptUnavailable(format!(
                    "No transcript available for video {} in language '{}'",
                    video, language
                ))
            })?;

        let lines = parse_json3(&content)?;
        debug!("Parsed {} caption lines", lines.len());

        Ok(lines)
    }
}

/// Reads the `<id>.<language>.json3` file yt-dlp wrote into `dir`, if any.
async fn read_caption_file(dir: &Path, video: &VideoId, language: &str) -> Result<Option<String>> {
    let path = dir.join(format!("{}.{}.json3", video, language));
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    // Window/style events carry no segments.
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parse a yt-dlp `json3` caption document into lines, preserving order.
pub fn parse_json3(content: &str) -> Result<Vec<TranscriptLine>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    Ok(captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.iter().map(|s| s.utf8.as_str()).collect();
            Some(TranscriptLine::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "wireMagic": "pb3",
        "events": [
            {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
            {"tStartMs": 120, "dDurationMs": 2400, "segs": [{"utf8": "never gonna"}, {"utf8": " give you up", "tOffsetMs": 600}]},
            {"tStartMs": 2520, "dDurationMs": 40, "aAppend": 1, "segs": [{"utf8": "\n"}]},
            {"tStartMs": 2560, "dDurationMs": 1800, "segs": [{"utf8": "never gonna let you down"}]}
        ]
    }"#;

    #[test]
    fn test_parse_json3() {
        let lines = parse_json3(SAMPLE).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "never gonna give you up");
        assert_eq!(lines[0].start_seconds, 0.12);
        assert_eq!(lines[0].duration_seconds, 2.4);
        assert_eq!(lines[1].text, "\n");
        assert_eq!(lines[2].text, "never gonna let you down");
    }

    #[test]
    fn test_parse_json3_rejects_garbage() {
        assert!(parse_json3("WEBVTT").is_err());
        assert!(parse_json3("{}").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_caption_file_matches_requested_language() {
        let dir = tempfile::tempdir().unwrap();
        let video = VideoId::new("dQw4w9WgXcQ").unwrap();
        assert_eq!(read_caption_file(dir.path(), &video, "en").await.unwrap(), None);

        std::fs::write(dir.path().join("dQw4w9WgXcQ.de.json3"), "deutsch").unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ.en.vtt"), "WEBVTT").unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ.en-orig.json3"), "original").unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ.en.json3"), "english").unwrap();

        let content = read_caption_file(dir.path(), &video, "en").await.unwrap();
        assert_eq!(content.as_deref(), Some("english"));
        assert_eq!(read_caption_file(dir.path(), &video, "fr").await.unwrap(), None);
    }

    #[test]
    fn test_language_codes() {
        for code in ["en", "de", "pt-BR", "zh-Hans", "en-orig"] {
            assert!(check_language(code).is_ok(), "{code} should be accepted");
        }
        for code in ["", "all", "en,de", "en.*", "-en", "-live_chat", "e", "en US"] {
            assert!(
                matches!(check_language(code), Err(ServiceError::UnsupportedLanguage(_))),
                "{code} should be refused"
            );
        }
    }

    #[tokio::test]
    async fn test_selector_language_refused_before_running_binary() {
        let source = YtDlpTranscriptSource::with_binary(
            "/nonexistent/yt-dlp-for-tests",
            Duration::from_secs(5),
        );
        let video = VideoId::new("dQw4w9WgXcQ").unwrap();

        for code in ["all", "en,de", "en.*"] {
            let err = source.fetch_transcript(&video, code).await.unwrap_err();
            assert!(matches!(err, ServiceError::UnsupportedLanguage(ref c) if c == code));
        }
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let source = YtDlpTranscriptSource::with_binary(
            "/nonexistent/yt-dlp-for-tests",
            Duration::from_secs(5),
        );
        let video = VideoId::new("dQw4w9WgXcQ").unwrap();

        let err = source.fetch_transcript(&video, "en").await.unwrap_err();
        assert!(matches!(err, ServiceError::ToolNotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_binary() {
        let source = YtDlpTranscriptSource::with_binary("false", Duration::from_secs(5));
        let video = VideoId::new("dQw4w9WgXcQ").unwrap();

        let err = source.fetch_transcript(&video, "en").await.unwrap_err();
        assert!(matches!(err, ServiceError::ToolFailed(_)));
    }
}
