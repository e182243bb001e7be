//! Internal domain models for lyrics search, resolution and publishing.
//!
//! These types are OUR types - they don't change when provider APIs change.
//! All provider responses get converted into these types via adapters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Maximum number of artists reported by [`top_artists`].
pub const TOP_ARTIST_LIMIT: usize = 3;

/// Provider a search result came from.
///
/// Declaration order is the merge priority used by the search aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Lrclib,
    Musixmatch,
    Genius,
}

impl Source {
    /// All sources in merge priority order
    pub const ALL: [Source; 3] = [Source::Lrclib, Source::Musixmatch, Source::Genius];

    /// Position in the merged result list (lower comes first)
    pub fn priority(self) -> u8 {
        match self {
            Self::Lrclib => 0,
            Self::Musixmatch => 1,
            Self::Genius => 2,
        }
    }

    /// Stable lowercase identifier, used in config files and CLI flags
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lrclib => "lrclib",
            Self::Musixmatch => "musixmatch",
            Self::Genius => "genius",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = LyricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lrclib" => Ok(Self::Lrclib),
            "musixmatch" => Ok(Self::Musixmatch),
            "genius" => Ok(Self::Genius),
            other => Err(LyricsError::Validation(format!("unknown source '{}'", other))),
        }
    }
}

/// Popularity counter of a result.
///
/// Providers that don't expose stats (or omit them for a record) yield
/// [`Views::Unknown`] instead of failing normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Views {
    Count(u64),
    #[default]
    Unknown,
}

impl Views {
    pub fn from_option(count: Option<u64>) -> Self {
        count.map_or(Self::Unknown, Self::Count)
    }
}

impl fmt::Display for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Unknown => f.write_str("N/A"),
        }
    }
}

impl Serialize for Views {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::Unknown => serializer.serialize_str("N/A"),
        }
    }
}

/// One search hit in canonical shape.
///
/// `id` is only unique within `source`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Track duration in seconds
    pub duration: Option<f64>,
    pub image_url: Option<String>,
    pub views: Views,
    pub source: Source,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
    pub instrumental: bool,
}

/// A free-text search, optionally paged (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: 1,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Details for a single track fetched by provider id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDetails {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Web page for the track (scrape target for page-only providers)
    pub url: Option<String>,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
}

/// Proof-of-work challenge issued before a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub prefix: String,
    pub target_hex: String,
}

/// Solved challenge, sent as `"{prefix}:{nonce}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishToken(String);

impl PublishToken {
    pub fn new(challenge: &Challenge, nonce: u64) -> Self {
        Self(format!("{}:{}", challenge.prefix, nonce))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lyrics to contribute to the community database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsSubmission {
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    #[serde(rename = "duration")]
    pub duration_seconds: f64,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
}

impl LyricsSubmission {
    /// Check that every identity field is present.
    pub fn validate(&self) -> Result<(), LyricsError> {
        let missing: Vec<&str> = [
            ("trackName", self.track_name.trim().is_empty()),
            ("artistName", self.artist_name.trim().is_empty()),
            ("albumName", self.album_name.trim().is_empty()),
            (
                "duration",
                !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0,
            ),
        ]
        .into_iter()
        .filter_map(|(field, bad)| bad.then_some(field))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LyricsError::Validation(format!(
                "missing or invalid fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Up to [`TOP_ARTIST_LIMIT`] distinct artists, first-seen order.
pub fn top_artists(results: &[SearchResult]) -> Vec<String> {
    let mut artists: Vec<String> = Vec::with_capacity(TOP_ARTIST_LIMIT);
    for result in results {
        if artists.len() == TOP_ARTIST_LIMIT {
            break;
        }
        if !artists.iter().any(|a| a == &result.artist) {
            artists.push(result.artist.clone());
        }
    }
    artists
}

/// Errors produced by the lyrics pipeline
#[derive(Debug, Clone, thiserror::Error)]
pub enum LyricsError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Provider {provider} unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    #[error("Lyrics not found")]
    LyricsNotFound,

    #[error("Could not obtain publish challenge: {0}")]
    ChallengeUnavailable(String),

    #[error("Invalid challenge: {0}")]
    InvalidChallenge(String),

    #[error("Challenge not solved within {iterations} attempts")]
    ChallengeTooHard { iterations: u64 },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Publish rejected: {0}")]
    PublishRejected(String),

    #[error("{provider} does not support {operation}")]
    Unsupported {
        provider: String,
        operation: &'static str,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl LyricsError {
    pub fn unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(provider: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            operation,
        }
    }
}
