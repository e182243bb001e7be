//! Adapter layer: Convert Musixmatch DTOs to domain models
//!
//! This is the ONLY place where Musixmatch DTO types are converted to domain types.

use super::dto;
use crate::lyrics::domain::{SearchResult, Source, Views};

/// Placeholder cover Musixmatch serves when an album has no art
const NO_COVER_MARKER: &str = "nocover";

/// Convert a track record. Records without a name or artist are skipped.
pub fn to_search_result(track: dto::Track) -> Option<SearchResult> {
    let title = non_blank(track.track_name)?;
    let artist = non_blank(track.artist_name)?;

    let image_url = non_blank(track.album_coverart_100x100)
        .filter(|url| !url.contains(NO_COVER_MARKER));

    Some(SearchResult {
        id: track.track_id.to_string(),
        title,
        artist,
        album: non_blank(track.album_name),
        duration: track.track_length.filter(|&s| s > 0).map(|s| s as f64),
        image_url,
        views: Views::Unknown,
        source: Source::Musixmatch,
        // Lyrics text is not part of the search payload
        plain_lyrics: None,
        synced_lyrics: None,
        instrumental: track.instrumental != 0,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track() -> dto::Track {
        dto::Track {
            track_id: 15953433,
            track_name: Some("Yesterday".to_string()),
            artist_name: Some("The Beatles".to_string()),
            album_name: Some("Help!".to_string()),
            track_length: Some(125),
            instrumental: 0,
            has_lyrics: 1,
            album_coverart_100x100: Some(
                "https://s.mxmcdn.net/images-storage/albums/1/cover.jpg".to_string(),
            ),
            track_share_url: None,
        }
    }

    #[test]
    fn test_convert_track() {
        let result = to_search_result(make_track()).unwrap();
        assert_eq!(result.id, "15953433");
        assert_eq!(result.source, Source::Musixmatch);
        assert_eq!(result.duration, Some(125.0));
        assert!(result.image_url.is_some());
        assert!(!result.instrumental);
        assert!(result.plain_lyrics.is_none());
    }

    #[test]
    fn test_placeholder_cover_is_dropped() {
        let mut track = make_track();
        track.album_coverart_100x100 =
            Some("http://s.mxmcdn.net/images-storage/albums/nocover.png".to_string());
        assert_eq!(to_search_result(track).unwrap().image_url, None);
    }

    #[test]
    fn test_zero_length_means_unknown_duration() {
        let mut track = make_track();
        track.track_length = Some(0);
        assert_eq!(to_search_result(track).unwrap().duration, None);
    }

    #[test]
    fn test_instrumental_flag() {
        let mut track = make_track();
        track.instrumental = 1;
        assert!(to_search_result(track).unwrap().instrumental);
    }

    #[test]
    fn test_skips_nameless_track() {
        let mut track = make_track();
        track.track_name = None;
        assert!(to_search_result(track).is_none());
    }
}
