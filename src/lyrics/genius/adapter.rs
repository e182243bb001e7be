//! Adapter layer: Convert Genius DTOs to domain models
//!
//! This is the ONLY place where Genius DTO types are converted to domain types.

use super::dto;
use crate::lyrics::domain::{SearchResult, Source, TrackDetails, Views};

/// Convert a search hit. Non-song hits and songs without an artist are skipped.
pub fn to_search_result(hit: dto::Hit) -> Option<SearchResult> {
    if hit.hit_type.as_deref().is_some_and(|t| t != "song") {
        return None;
    }

    let song = hit.result;
    let title = song.title.filter(|t| !t.trim().is_empty())?;
    let artist = song
        .primary_artist
        .map(|a| a.name)
        .filter(|n| !n.trim().is_empty())?;

    // Missing stats block or missing pageviews both mean "unknown"
    let views = Views::from_option(song.stats.and_then(|s| s.pageviews));

    Some(SearchResult {
        id: song.id.to_string(),
        title,
        artist,
        album: song.album.map(|a| a.name),
        duration: None,
        image_url: song
            .song_art_image_thumbnail_url
            .filter(|u| !u.trim().is_empty()),
        views,
        source: Source::Genius,
        plain_lyrics: None,
        synced_lyrics: None,
        instrumental: false,
    })
}

/// Convert a full song record
pub fn to_track_details(song: dto::Song) -> TrackDetails {
    TrackDetails {
        id: song.id.to_string(),
        title: song.title.unwrap_or_default(),
        artist: song.primary_artist.map(|a| a.name).unwrap_or_default(),
        album: song.album.map(|a| a.name),
        url: song.url,
        plain_lyrics: None,
        synced_lyrics: None,
    }
}
