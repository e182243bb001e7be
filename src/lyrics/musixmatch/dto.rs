//! Musixmatch API Data Transfer Objects
//!
//! These types match what the Musixmatch `track.search` endpoint returns.
//! DO NOT use these types outside the musixmatch module - convert to domain types.
//!
//! API Reference: https://developer.musixmatch.com/documentation/api-reference/track-search
//!
//! Quirks:
//! - Errors come back as HTTP 200 with the real status in `message.header.status_code`.
//! - On errors or empty results `message.body` is an empty array or string instead
//!   of an object, so it is kept as raw JSON and inspected by the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope {
    pub message: Message,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub header: Header,
    #[serde(default)]
    pub body: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Header {
    pub status_code: u16,
    /// Total number of hits for the query
    pub available: Option<u64>,
    pub hint: Option<String>,
}

/// One `track_list` element
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackListEntry {
    pub track: Track,
}

/// Track record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub track_id: u64,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    /// Duration in whole seconds (absent on newer plans)
    pub track_length: Option<u64>,
    /// 0 or 1
    #[serde(default)]
    pub instrumental: u8,
    /// 0 or 1
    #[serde(default)]
    pub has_lyrics: u8,
    pub album_coverart_100x100: Option<String>,
    pub track_share_url: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
