//! lyrics.ovh HTTP client

use async_trait::async_trait;

use super::dto;
use crate::lyrics::domain::LyricsError;
use crate::lyrics::traits::LyricsLookupApi;

/// Default lyrics.ovh API root
pub const DEFAULT_BASE_URL: &str = "https://api.lyrics.ovh/v1";

/// lyrics.ovh API client
pub struct LyricsOvhClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LyricsOvhClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(reqwest::Client::new(), base_url)
    }

    fn lookup_url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        )
    }

    /// Look up lyrics. Any non-success status means "not found".
    pub async fn get_lyrics(&self, title: &str, artist: &str) -> Result<String, LyricsError> {
        let url = self.lookup_url(title, artist);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable("lyrics.ovh", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("lyrics.ovh returned HTTP {} for {}", status.as_u16(), url);
            return Err(LyricsError::LyricsNotFound);
        }

        let body = response
            .json::<dto::LyricsResponse>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;

        body.lyrics
            .filter(|l| !l.trim().is_empty())
            .ok_or(LyricsError::LyricsNotFound)
    }
}

#[async_trait]
impl LyricsLookupApi for LyricsOvhClient {
    async fn lookup(&self, title: &str, artist: &str) -> Result<String, LyricsError> {
        self.get_lyrics(title, artist).await
    }
}
