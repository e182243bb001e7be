//! LRCLIB HTTP client
//!
//! Handles communication with the LRCLIB web service, the community synced
//! lyrics database. LRCLIB is the only provider that accepts submissions;
//! writes are gated behind a proof-of-work challenge.
//! See: https://lrclib.net/docs
//!
//! ## Endpoints used
//! - `GET  /search?q=`          free-text search (array of tracks)
//! - `GET  /get/{id}`           single track with lyrics
//! - `POST /request-challenge`  `{prefix, target}`
//! - `POST /publish`            `X-Publish-Token: {prefix}:{nonce}`, 201 on success

use async_trait::async_trait;
use serde_json::Value;

use super::{adapter, dto};
use crate::lyrics::domain::{
    Challenge, LyricsError, LyricsSubmission, PublishToken, SearchQuery, SearchResult, Source,
    TrackDetails,
};
use crate::lyrics::normalize;
use crate::lyrics::traits::LyricsProvider;

/// Default LRCLIB API root
pub const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

const PROVIDER: &str = "lrclib";

/// LRCLIB API client
pub struct LrclibClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    /// Create a client on a shared HTTP client
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

    /// Search by free text. LRCLIB has no paging, `query.page` is ignored.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(&query.text));
        tracing::debug!("lrclib search: {}", url);

        let response = self.get(&url).await?;
        let records = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;

        Ok(normalize::normalize_batch(Source::Lrclib, records))
    }

    /// Fetch one track (with lyrics) by LRCLIB id
    pub async fn get_track(&self, id: &str) -> Result<TrackDetails, LyricsError> {
        let url = format!("{}/get/{}", self.base_url, urlencoding::encode(id));

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LyricsError::LyricsNotFound);
        }
        let response = check_status(response).await?;

        let track = response
            .json::<dto::Track>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;
        Ok(adapter::to_track_details(track))
    }

    /// Request a fresh publish challenge
    pub async fn request_challenge(&self) -> Result<Challenge, LyricsError> {
        let url = format!("{}/request-challenge", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| LyricsError::ChallengeUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!("Failed to read challenge error body: {}", e);
                String::new()
            });
            return Err(LyricsError::ChallengeUnavailable(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let challenge = response
            .json::<dto::ChallengeResponse>()
            .await
            .map_err(|e| LyricsError::Parse(e.to_string()))?;
        Ok(adapter::to_challenge(challenge))
    }

    /// Submit lyrics. Anything other than `201 Created` is a rejection and
    /// carries the provider's body untouched.
    pub async fn publish_lyrics(
        &self,
        token: &PublishToken,
        submission: &LyricsSubmission,
    ) -> Result<(), LyricsError> {
        let url = format!("{}/publish", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("X-Publish-Token", token.as_str())
            .json(submission)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            // Rejections must carry the server body
            let body = response.text().await.map_err(|e| {
                LyricsError::unavailable(
                    PROVIDER,
                    format!("HTTP {} with unreadable body: {}", status.as_u16(), e),
                )
            })?;
            tracing::warn!("Publish rejected with HTTP {}", status.as_u16());
            return Err(LyricsError::PublishRejected(body));
        }
        Ok(())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, LyricsError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LyricsError::unavailable(PROVIDER, e.to_string()))?;
        check_status(response).await
    }
}

/// Turn a non-success status into `ProviderUnavailable`, keeping the API message
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LyricsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to read LRCLIB error body: {}", e);
        String::new()
    });
    let detail = serde_json::from_str::<dto::ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    Err(LyricsError::unavailable(
        PROVIDER,
        format!(
            "HTTP {}: {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            detail
        ),
    ))
}

#[async_trait]
impl LyricsProvider for LrclibClient {
    fn source(&self) -> Source {
        Source::Lrclib
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        LrclibClient::search(self, query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<TrackDetails, LyricsError> {
        self.get_track(id).await
    }

    async fn fetch_challenge(&self) -> Result<Challenge, LyricsError> {
        self.request_challenge().await
    }

    async fn publish(
        &self,
        token: &PublishToken,
        submission: &LyricsSubmission,
    ) -> Result<(), LyricsError> {
        self.publish_lyrics(token, submission).await
    }
}
