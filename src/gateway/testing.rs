//! In-memory fakes for the upstream collaborators.

use super::{JsonFetcher, TranscriptLine, TranscriptSource, UpstreamRequest, UpstreamResult};
use crate::error::{Result, ServiceError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned payloads by URL and records every request.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<UpstreamRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, payload: Value) -> Self {
        self.responses.insert(url.to_string(), payload);
        self
    }

    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }
}

#[async_trait]
impl JsonFetcher for FakeFetcher {
    async fn fetch_json(&self, request: &UpstreamRequest) -> UpstreamResult {
        self.calls.lock().unwrap().push(request.clone());
        self.responses.get(&request.url).cloned()
    }
}

/// Returns fixed lines, or fails with a fixed reason.
pub struct FakeTranscripts {
    outcome: std::result::Result<Vec<String>, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeTranscripts {
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            outcome: Ok(lines.iter().map(|l| l.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(video id, language)` pairs requested so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_transcript(&self, video: &VideoId, language: &str) -> Result<Vec<TranscriptLine>> {
        self.calls
            .lock()
            .unwrap()
            .push((video.to_string(), language.to_string()));

        match &self.outcome {
            Ok(lines) => Ok(lines
                .iter()
                .enumerate()
                .map(|(i, text)| TranscriptLine::new(text.clone(), i as f64 * 2.0, 2.0))
                .collect()),
            Err(reason) => Err(ServiceError::TranscriptUnavailable(reason.clone())),
        }
    }
}
