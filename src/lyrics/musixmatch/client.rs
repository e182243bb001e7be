//! Musixmatch HTTP client
//!
//! Structured metadata search. The free API tier does not expose full lyrics
//! text, so lyrics for Musixmatch hits are resolved through a title/artist
//! lookup service instead (see `resolver`).
//!
//! IMPORTANT: check `message.header.status_code`, not just the HTTP status.

use async_trait::async_trait;

use super::dto;
use crate::lyrics::domain::{LyricsError, SearchQuery, SearchResult, Source};
use crate::lyrics::normalize;
use crate::lyrics::traits::LyricsProvider;

/// Default Musixmatch API root
pub const DEFAULT_BASE_URL: &str = "https://api.musixmatch.com/ws/1.1";

/// Results requested per page
const PAGE_SIZE: u32 = 10;

const PROVIDER: &str = "musixmatch";

/// Musixmatch API client
pub struct MusixmatchClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl MusixmatchClient {
    /// Create a client with the given API key
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::new(reqwest::Client::new(), base_url, api_key)
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/track.search?q={}&page={}&page_size={}&s_track_rating=desc&apikey={}",
            self.base_url,
            urlencoding::encode(&query.text),
            query.page,
            PAGE_SIZE,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Search tracks, most highly rated first
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        let url = self.search_url(query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::unavailable(
                PROVIDER,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let envelope = response
            .json::<dto::Envelope>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;

        let records = into_records(envelope)?;
        Ok(normalize::normalize_batch(Source::Musixmatch, records))
    }
}

/// Unwrap the envelope, honouring the in-band status code
fn into_records(envelope: dto::Envelope) -> Result<Vec<serde_json::Value>, LyricsError> {
    let header = envelope.message.header;
    if header.status_code != 200 {
        return Err(LyricsError::unavailable(
            PROVIDER,
            format!(
                "API status {}{}",
                header.status_code,
                header.hint.map(|h| format!(" ({})", h)).unwrap_or_default()
            ),
        ));
    }

    Ok(match envelope.message.body {
        serde_json::Value::Object(mut body) => match body.remove("track_list") {
            Some(serde_json::Value::Array(list)) => list,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

#[async_trait]
impl LyricsProvider for MusixmatchClient {
    fn source(&self) -> Source {
        Source::Musixmatch
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        MusixmatchClient::search(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> dto::Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = MusixmatchClient::with_base_url("key", "http://localhost:8080/");
        assert_eq!(client.api_key, "key");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_search_url_carries_page() {
        let client = MusixmatchClient::with_base_url("k&y", DEFAULT_BASE_URL);
        let url = client.search_url(&SearchQuery::new("yesterday").with_page(3));
        assert!(url.starts_with(
            "https://api.musixmatch.com/ws/1.1/track.search?q=yesterday&page=3"
        ));
        assert!(url.ends_with("apikey=k%26y"));
    }

    #[test]
    fn test_in_band_error_is_provider_unavailable() {
        let env = envelope(r#"{"message": {"header": {"status_code": 401}, "body": ""}}"#);
        let err = into_records(env).unwrap_err();
        assert!(err.to_string().contains("401"));
        assert!(matches!(err, LyricsError::ProviderUnavailable { .. }));
    }

    #[test]
    fn test_empty_array_body_is_zero_results() {
        let env = envelope(r#"{"message": {"header": {"status_code": 200}, "body": []}}"#);
        assert!(into_records(env).unwrap().is_empty());
    }

    #[test]
    fn test_track_list_extracted() {
        let env = envelope(
            r#"{"message": {"header": {"status_code": 200},
                "body": {"track_list": [{"track": {"track_id": 1}}, {"track": {"track_id": 2}}]}}}"#,
        );
        assert_eq!(into_records(env).unwrap().len(), 2);
    }
}
