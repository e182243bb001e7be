//! Adapter layer: Convert LRCLIB DTOs to domain models
//!
//! This is the ONLY place where LRCLIB DTO types are converted to domain types.

use super::dto;
use crate::lyrics::domain::{Challenge, SearchResult, Source, TrackDetails, Views};

/// Convert a search record. Records without a track or artist name are skipped.
pub fn to_search_result(track: dto::Track) -> Option<SearchResult> {
    let title = non_blank(track.track_name).or_else(|| non_blank(track.name))?;
    let artist = non_blank(track.artist_name)?;

    Some(SearchResult {
        id: track.id.to_string(),
        title,
        artist,
        album: non_blank(track.album_name),
        duration: track.duration,
        image_url: None,
        // LRCLIB publishes no popularity stats
        views: Views::Unknown,
        source: Source::Lrclib,
        plain_lyrics: track.plain_lyrics,
        synced_lyrics: track.synced_lyrics,
        instrumental: track.instrumental,
    })
}

/// Convert a `/get/{id}` record
pub fn to_track_details(track: dto::Track) -> TrackDetails {
    TrackDetails {
        id: track.id.to_string(),
        title: track.track_name.or(track.name).unwrap_or_default(),
        artist: track.artist_name.unwrap_or_default(),
        album: non_blank(track.album_name),
        url: None,
        plain_lyrics: track.plain_lyrics,
        synced_lyrics: track.synced_lyrics,
    }
}

pub fn to_challenge(response: dto::ChallengeResponse) -> Challenge {
    Challenge {
        prefix: response.prefix,
        target_hex: response.target,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
