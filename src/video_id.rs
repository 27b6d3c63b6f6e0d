//! Video identifier normalization.
//!
//! Turns the heterogeneous ways a caller may refer to a YouTube video (watch
//! page URL, `youtu.be` short link, bare ID) into a canonical [`VideoId`].
//! Normalization happens before any network call, so a malformed reference
//! never reaches the transcript provider.

use crate::error::{Result, ServiceError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Host serving short links (`https://youtu.be/<id>`).
const SHORT_LINK_HOST: &str = "youtu.be";

/// Substring identifying the canonical video site (`www.`, `m.`, `music.` ...).
const VIDEO_SITE_DOMAIN: &str = "youtube.com";

static VIDEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex"));

/// A canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accept `candidate` only if it matches `[a-zA-Z0-9_-]{11}`.
    pub fn new(candidate: &str) -> Option<Self> {
        VIDEO_ID_PATTERN
            .is_match(candidate)
            .then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the raw input was understood before matching.
#[derive(Debug)]
enum Reference<'a> {
    /// Absolute URL with a host component.
    Parsed { host: String, url: Url },
    /// Anything else; a candidate bare identifier.
    Unparseable(&'a str),
}

impl<'a> Reference<'a> {
    fn classify(input: &'a str) -> Self {
        match Url::parse(input) {
            Ok(url) => match url.host_str() {
                Some(host) => Reference::Parsed {
                    host: host.to_ascii_lowercase(),
                    url,
                },
                None => Reference::Unparseable(input),
            },
            Err(_) => Reference::Unparseable(input),
        }
    }
}

/// Outcome of a single matcher.
enum Match {
    /// Candidate extracted; still subject to the identifier pattern.
    Found(String),
    /// The input is recognized but unusable.
    Reject(String),
    /// Not this matcher's shape.
    Next,
}

type Matcher = fn(&Reference<'_>, &str) -> Match;

/// Tried in order; the first non-[`Match::Next`] result wins.
const MATCHERS: [Matcher; 3] = [short_link, watch_page, bare_id];

fn short_link(reference: &Reference<'_>, _input: &str) -> Match {
    let Reference::Parsed { host, url } = reference else {
        return Match::Next;
    };
    if host != SHORT_LINK_HOST {
        return Match::Next;
    }
    match url.path_segments().and_then(|mut s| s.next()) {
        Some(segment) if !segment.is_empty() => Match::Found(segment.to_string()),
        _ => Match::Next,
    }
}

fn watch_page(reference: &Reference<'_>, input: &str) -> Match {
    let Reference::Parsed { host, url } = reference else {
        return Match::Next;
    };
    if !host.contains(VIDEO_SITE_DOMAIN) {
        return Match::Next;
    }
    match url.query_pairs().find(|(key, _)| key == "v") {
        Some((_, value)) if !value.is_empty() => Match::Found(value.into_owned()),
        _ => Match::Reject(format!("Invalid YouTube URL: {}", input)),
    }
}

fn bare_id(reference: &Reference<'_>, _input: &str) -> Match {
    match reference {
        Reference::Unparseable(raw) => Match::Found((*raw).to_string()),
        Reference::Parsed { .. } => Match::Next,
    }
}

/// Normalize a video URL, short link or bare ID into a [`VideoId`].
///
/// Every successful result matches the 11-character identifier pattern,
/// including identifiers taken from short links and `v=` query parameters.
pub fn normalize(input: &str) -> Result<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ServiceError::InvalidIdentifier(
            "YouTube URL or ID is required".to_string(),
        ));
    }

    let reference = Reference::classify(input);
    let extracted = MATCHERS
        .iter()
        .map(|matcher| matcher(&reference, input))
        .find(|m| !matches!(m, Match::Next));

    match extracted {
        Some(Match::Found(candidate)) => VideoId::new(&candidate).ok_or_else(|| {
            ServiceError::InvalidIdentifier(format!("Could not extract video ID from: {}", input))
        }),
        Some(Match::Reject(reason)) => Err(ServiceError::InvalidIdentifier(reason)),
        Some(Match::Next) | None => Err(ServiceError::InvalidIdentifier(format!(
            "Could not extract video ID from: {}",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        normalize(input).ok().map(|v| v.to_string())
    }

    #[test]
    fn test_bare_ids_are_returned_unchanged() {
        for input in ["dQw4w9WgXcQ", "a_b-c_d-e_f", "00000000000", "-----------"] {
            assert_eq!(id(input).as_deref(), Some(input));
        }
    }

    #[test]
    fn test_watch_urls() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("http://music.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_short_links() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ?si=tracking").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_short_link_with_malformed_segment_is_rejected() {
        // Short-link segments go through the same pattern check as bare IDs.
        assert!(normalize("https://youtu.be/short").is_err());
        assert!(normalize("https://youtu.be/").is_err());
    }

    #[test]
    fn test_watch_url_without_video_parameter() {
        let err = normalize("https://www.youtube.com/feed/subscriptions").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid YouTube URL: https://www.youtube.com/feed/subscriptions"
        );
        assert!(normalize("https://www.youtube.com/watch?v=tooshort").is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            normalize("").unwrap_err().to_string(),
            "YouTube URL or ID is required"
        );
        assert_eq!(
            normalize("not a url").unwrap_err().to_string(),
            "Could not extract video ID from: not a url"
        );
        assert!(normalize("https://vimeo.com/123456789").is_err());
        assert!(normalize("dQw4w9WgXcQX").is_err());
        assert!(normalize("dQw4w9WgXc!").is_err());
    }

    #[test]
    fn test_watch_url_builder() {
        let video = VideoId::new("dQw4w9WgXcQ").unwrap();
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
