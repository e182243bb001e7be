//! LRCLIB API Data Transfer Objects
//!
//! These types match what the LRCLIB API returns and accepts.
//! DO NOT use these types outside the lrclib module - convert to domain types.
//!
//! API Reference: https://lrclib.net/docs

use serde::{Deserialize, Serialize};

/// A track record, as returned by `/search` (array) and `/get/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    /// Display name (usually equal to track_name)
    pub name: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    /// Duration in seconds (fractional)
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: bool,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
}

/// Response of `POST /request-challenge`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChallengeResponse {
    pub prefix: String,
    pub target: String,
}

/// Error body returned on non-success responses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: Option<u16>,
    pub name: Option<String>,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
