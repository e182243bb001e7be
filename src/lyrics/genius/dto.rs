//! Genius API Data Transfer Objects
//!
//! These types match what the Genius API returns.
//! DO NOT use these types outside the genius module - convert to domain types.
//!
//! API Reference: https://docs.genius.com

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /search` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub meta: Meta,
    pub response: SearchBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Meta {
    pub status: u16,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchBody {
    /// Kept raw so each hit can be decoded (or skipped) independently
    #[serde(default)]
    pub hits: Vec<Value>,
}

/// One search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hit {
    /// Always "song" for the search endpoint
    #[serde(rename = "type")]
    pub hit_type: Option<String>,
    pub result: Song,
}

/// `GET /songs/{id}` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongResponse {
    pub response: SongBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongBody {
    pub song: Song,
}

/// Song record (search hits carry a subset of the full song fields)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Song {
    pub id: u64,
    pub title: Option<String>,
    pub full_title: Option<String>,
    /// Lyrics web page
    pub url: Option<String>,
    pub primary_artist: Option<Artist>,
    pub album: Option<Album>,
    pub song_art_image_thumbnail_url: Option<String>,
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub id: Option<u64>,
    pub name: String,
}

/// Popularity stats; `pageviews` is omitted for less popular songs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Stats {
    pub pageviews: Option<u64>,
    #[serde(default)]
    pub hot: bool,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "meta": {"status": 200},
            "response": {
                "hits": [{
                    "highlights": [],
                    "index": "song",
                    "type": "song",
                    "result": {
                        "id": 90475,
                        "title": "Yesterday",
                        "full_title": "Yesterday by The Beatles",
                        "url": "https://genius.com/The-beatles-yesterday-lyrics",
                        "song_art_image_thumbnail_url": "https://images.genius.com/thumb.300x300x1.jpg",
                        "stats": {"unreviewed_annotations": 0, "hot": false, "pageviews": 812345},
                        "primary_artist": {"id": 586, "name": "The Beatles"}
                    }
                }]
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse search");
        assert_eq!(response.meta.status, 200);
        assert_eq!(response.response.hits.len(), 1);

        let hit: Hit = serde_json::from_value(response.response.hits[0].clone()).unwrap();
        assert_eq!(hit.hit_type.as_deref(), Some("song"));
        assert_eq!(hit.result.stats.unwrap().pageviews, Some(812345));
    }

    #[test]
    fn test_parse_song_response() {
        let json = r#"{
            "meta": {"status": 200},
            "response": {
                "song": {
                    "id": 90475,
                    "title": "Yesterday",
                    "url": "https://genius.com/The-beatles-yesterday-lyrics",
                    "album": {"id": 11039, "name": "Help!"},
                    "primary_artist": {"id": 586, "name": "The Beatles"}
                }
            }
        }"#;

        let response: SongResponse = serde_json::from_str(json).expect("Should parse song");
        let song = response.response.song;
        assert_eq!(song.album.unwrap().name, "Help!");
        assert!(song.url.unwrap().ends_with("-lyrics"));
    }

    #[test]
    fn test_parse_stats_without_pageviews() {
        let json = r#"{"unreviewed_annotations": 1, "hot": false}"#;
        let stats: Stats = serde_json::from_str(json).expect("Should parse stats");
        assert!(stats.pageviews.is_none());
    }
}
