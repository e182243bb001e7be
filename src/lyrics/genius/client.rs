//! Genius HTTP client
//!
//! The Genius API returns song metadata but no lyrics; the lyrics live on the
//! song's web page and are scraped (see `scrape`).
//! See: https://docs.genius.com
//!
//! API calls need a bearer access token. Page fetches are anonymous.

use async_trait::async_trait;

use super::{adapter, dto};
use crate::lyrics::domain::{LyricsError, SearchQuery, SearchResult, Source, TrackDetails};
use crate::lyrics::normalize;
use crate::lyrics::traits::{LyricsProvider, PageFetcher};

/// Default Genius API root
pub const DEFAULT_BASE_URL: &str = "https://api.genius.com";

const PROVIDER: &str = "genius";

/// Genius API client
pub struct GeniusClient {
    access_token: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl GeniusClient {
    /// Create a client with the given access token
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::new(reqwest::Client::new(), base_url, access_token)
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/search?q={}&page={}",
            self.base_url,
            urlencoding::encode(&query.text),
            query.page
        )
    }

    /// Search songs
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        let response = self.send_api_request(&self.search_url(query)).await?;
        let response = check_status(response).await?;
        let body = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;

        Ok(normalize::normalize_batch(Source::Genius, body.response.hits))
    }

    /// Fetch song metadata, including its lyrics page URL
    ///
    /// An unknown song id is a lookup miss (`LyricsNotFound`), not an outage.
    pub async fn get_song(&self, id: &str) -> Result<TrackDetails, LyricsError> {
        let url = format!("{}/songs/{}", self.base_url, urlencoding::encode(id));

        let response = self.send_api_request(&url).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LyricsError::LyricsNotFound);
        }
        let response = check_status(response).await?;
        let body = response
            .json::<dto::SongResponse>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;

        Ok(adapter::to_track_details(body.response.song))
    }

    /// Send an authenticated API request
    async fn send_api_request(&self, url: &str) -> Result<reqwest::Response, LyricsError> {
        self.http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))
    }
}

/// Any non-success status is `ProviderUnavailable`
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LyricsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to read Genius error body: {}", e);
        String::new()
    });
    Err(LyricsError::unavailable(
        PROVIDER,
        format!(
            "HTTP {}: {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            body.chars().take(200).collect::<String>()
        ),
    ))
}

#[async_trait]
impl LyricsProvider for GeniusClient {
    fn source(&self) -> Source {
        Source::Genius
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        GeniusClient::search(self, query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<TrackDetails, LyricsError> {
        self.get_song(id).await
    }
}

#[async_trait]
impl PageFetcher for GeniusClient {
    async fn fetch_html(&self, url: &str) -> Result<String, LyricsError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LyricsError::unavailable(
                PROVIDER,
                format!("HTTP {} fetching {}", status.as_u16(), url),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::search::{FailurePolicy, SearchAggregator};
    use crate::test_utils::StubServer;
    use std::sync::Arc;

    #[test]
    fn test_client_with_custom_url() {
        let client = GeniusClient::with_base_url("token", "http://localhost:8080/");
        assert_eq!(client.access_token, "token");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_search_url_carries_page() {
        let client = GeniusClient::with_base_url("token", DEFAULT_BASE_URL);
        let query = SearchQuery::new("Let It Be").with_page(2);
        assert_eq!(
            client.search_url(&query),
            "https://api.genius.com/search?q=Let%20It%20Be&page=2"
        );
    }

    #[test]
    fn test_reports_genius_source() {
        let client = GeniusClient::with_base_url("token", DEFAULT_BASE_URL);
        assert_eq!(LyricsProvider::source(&client), Source::Genius);
    }

    #[tokio::test]
    async fn test_search_not_found_is_provider_unavailable() {
        let server = StubServer::start(404, r#"{"meta":{"status":404}}"#).await;
        let client = GeniusClient::with_base_url("token", server.base_url());

        let err = client.search(&SearchQuery::new("yesterday")).await.unwrap_err();

        assert!(
            matches!(err, LyricsError::ProviderUnavailable { ref provider, ref reason }
                if provider == "genius" && reason.contains("404"))
        );
        assert!(server.requests()[0].starts_with("GET /search?q=yesterday&page=1 "));
    }

    #[tokio::test]
    async fn test_fail_fast_search_reports_genius_outage() {
        let server = StubServer::start(404, "").await;
        let genius = Arc::new(GeniusClient::with_base_url("token", server.base_url()));

        let err = SearchAggregator::new(vec![genius as Arc<dyn LyricsProvider>])
            .with_policy(FailurePolicy::FailFast)
            .search(&SearchQuery::new("yesterday"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LyricsError::ProviderUnavailable { ref provider, .. } if provider == "genius"
        ));
    }

    #[tokio::test]
    async fn test_unknown_song_is_lyrics_not_found() {
        let server = StubServer::start(404, r#"{"meta":{"status":404}}"#).await;
        let client = GeniusClient::with_base_url("token", server.base_url());

        let err = client.get_song("999999999").await.unwrap_err();

        assert!(matches!(err, LyricsError::LyricsNotFound));
        assert!(server.requests()[0].starts_with("GET /songs/999999999 "));
    }

    #[tokio::test]
    async fn test_song_server_error_is_provider_unavailable() {
        let server = StubServer::start(500, "oops").await;
        let client = GeniusClient::with_base_url("token", server.base_url());

        let err = client.get_song("90475").await.unwrap_err();

        assert!(matches!(
            err,
            LyricsError::ProviderUnavailable { ref reason, .. } if reason.contains("oops")
        ));
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token() {
        let body = r#"{"meta":{"status":200},"response":{"hits":[]}}"#;
        let server = StubServer::start(200, body).await;
        let client = GeniusClient::with_base_url("secret", server.base_url());

        let results = client.search(&SearchQuery::new("x")).await.unwrap();

        assert!(results.is_empty());
        let request = server.requests()[0].to_ascii_lowercase();
        assert!(request.contains("authorization: bearer secret"));
    }
}
