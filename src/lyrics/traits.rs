//! Trait definitions for external lyrics services.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! Every provider implements [`LyricsProvider`], but only the operations it
//! actually offers. The default method bodies report
//! [`LyricsError::Unsupported`].

use async_trait::async_trait;

use super::domain::{
    Challenge, LyricsError, LyricsSubmission, PublishToken, SearchQuery, SearchResult, Source,
    TrackDetails,
};

/// Uniform capability interface over one lyrics/metadata service.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Which source tag this provider produces.
    fn source(&self) -> Source;

    /// Free-text search, returning normalized results.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
        let _ = query;
        Err(LyricsError::unsupported(self.source().as_str(), "search"))
    }

    /// Fetch a single track by provider-specific id.
    async fn fetch_by_id(&self, id: &str) -> Result<TrackDetails, LyricsError> {
        let _ = id;
        Err(LyricsError::unsupported(self.source().as_str(), "fetch by id"))
    }

    /// Request a fresh proof-of-work challenge for publishing.
    async fn fetch_challenge(&self) -> Result<Challenge, LyricsError> {
        Err(LyricsError::unsupported(self.source().as_str(), "challenge"))
    }

    /// Publish lyrics, authorized by a solved challenge token.
    async fn publish(
        &self,
        token: &PublishToken,
        submission: &LyricsSubmission,
    ) -> Result<(), LyricsError> {
        let _ = (token, submission);
        Err(LyricsError::unsupported(self.source().as_str(), "publish"))
    }
}

/// Lyrics text lookup by title and artist.
#[async_trait]
pub trait LyricsLookupApi: Send + Sync {
    /// Returns the lyrics text, or `LyricsNotFound`.
    async fn lookup(&self, title: &str, artist: &str) -> Result<String, LyricsError>;
}

/// Fetches raw HTML for scraping.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, LyricsError>;
}

/// Mock implementations for testing.
///
/// Returns configurable responses for testing different scenarios.
#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Mock provider with canned responses and call counters.
    pub struct MockProvider {
        pub source: Source,
        /// Results to return from search
        pub results: Vec<SearchResult>,
        /// Tracks returned from fetch_by_id, keyed by id
        pub tracks: HashMap<String, TrackDetails>,
        /// Challenge handed out by fetch_challenge
        pub challenge: Option<Challenge>,
        /// Raw body to reject publishes with
        pub reject_publish: Option<String>,
        /// Artificial latency applied to every call
        pub delay: Duration,
        /// Error to return (takes precedence over everything else)
        pub error: Option<LyricsError>,
        pub search_calls: AtomicUsize,
        pub challenge_calls: AtomicUsize,
        pub publish_calls: AtomicUsize,
        /// Last token received by publish
        pub last_token: std::sync::Mutex<Option<String>>,
    }

    impl MockProvider {
        /// Create a mock that returns nothing.
        pub fn empty(source: Source) -> Self {
            Self {
                source,
                results: vec![],
                tracks: HashMap::new(),
                challenge: None,
                reject_publish: None,
                delay: Duration::ZERO,
                error: None,
                search_calls: AtomicUsize::new(0),
                challenge_calls: AtomicUsize::new(0),
                publish_calls: AtomicUsize::new(0),
                last_token: std::sync::Mutex::new(None),
            }
        }

        /// Create a mock returning the given search results.
        pub fn with_results(source: Source, results: Vec<SearchResult>) -> Self {
            Self {
                results,
                ..Self::empty(source)
            }
        }

        /// Create a mock that fails every call.
        pub fn with_error(source: Source, error: LyricsError) -> Self {
            Self {
                error: Some(error),
                ..Self::empty(source)
            }
        }

        /// Create a mock that serves one track by id.
        pub fn with_track(source: Source, track: TrackDetails) -> Self {
            let mut tracks = HashMap::new();
            tracks.insert(track.id.clone(), track);
            Self {
                tracks,
                ..Self::empty(source)
            }
        }

        /// Create a mock that issues the given challenge.
        pub fn with_challenge(source: Source, prefix: &str, target_hex: &str) -> Self {
            Self {
                challenge: Some(Challenge {
                    prefix: prefix.to_string(),
                    target_hex: target_hex.to_string(),
                }),
                ..Self::empty(source)
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn rejecting(mut self, body: &str) -> Self {
            self.reject_publish = Some(body.to_string());
            self
        }

        async fn pause(&self) -> Result<(), LyricsError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LyricsProvider for MockProvider {
        fn source(&self) -> Source {
            self.source
        }

        async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchResult>, LyricsError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.pause().await?;
            Ok(self.results.clone())
        }

        async fn fetch_by_id(&self, id: &str) -> Result<TrackDetails, LyricsError> {
            self.pause().await?;
            self.tracks
                .get(id)
                .cloned()
                .ok_or_else(|| LyricsError::unavailable(self.source.as_str(), "HTTP 404 Not Found"))
        }

        async fn fetch_challenge(&self) -> Result<Challenge, LyricsError> {
            self.challenge_calls.fetch_add(1, Ordering::SeqCst);
            self.pause().await?;
            self.challenge
                .clone()
                .ok_or_else(|| LyricsError::ChallengeUnavailable("HTTP 503".to_string()))
        }

        async fn publish(
            &self,
            token: &PublishToken,
            _submission: &LyricsSubmission,
        ) -> Result<(), LyricsError> {
            self.publish_calls.fetch_add(1, Ordering::SeqCst);
            self.pause().await?;
            if let Ok(mut last) = self.last_token.lock() {
                *last = Some(token.as_str().to_string());
            }
            match &self.reject_publish {
                Some(body) => Err(LyricsError::PublishRejected(body.clone())),
                None => Ok(()),
            }
        }
    }

    /// Mock title/artist lookup service.
    pub struct MockLookup {
        pub lyrics: Option<String>,
        pub calls: AtomicUsize,
    }

    impl MockLookup {
        pub fn found(lyrics: &str) -> Self {
            Self {
                lyrics: Some(lyrics.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn not_found() -> Self {
            Self {
                lyrics: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LyricsLookupApi for MockLookup {
        async fn lookup(&self, _title: &str, _artist: &str) -> Result<String, LyricsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lyrics.clone().ok_or(LyricsError::LyricsNotFound)
        }
    }

    /// Mock page fetcher serving fixed HTML per URL.
    pub struct MockPages {
        pub pages: HashMap<String, String>,
    }

    impl MockPages {
        pub fn single(url: &str, html: &str) -> Self {
            let mut pages = HashMap::new();
            pages.insert(url.to_string(), html.to_string());
            Self { pages }
        }
    }

    #[async_trait]
    impl PageFetcher for MockPages {
        async fn fetch_html(&self, url: &str) -> Result<String, LyricsError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| LyricsError::unavailable("web", format!("no page at {}", url)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::test_utils::sample_result;

        /// Provider that only declares its source and relies on the defaults.
        struct BareProvider;

        #[async_trait]
        impl LyricsProvider for BareProvider {
            fn source(&self) -> Source {
                Source::Genius
            }
        }

        #[tokio::test]
        async fn test_default_methods_report_unsupported() {
            let provider = BareProvider;
            let err = provider.fetch_challenge().await.unwrap_err();
            assert!(matches!(
                err,
                LyricsError::Unsupported {
                    operation: "challenge",
                    ..
                }
            ));
            assert!(matches!(
                provider.search(&SearchQuery::new("x")).await,
                Err(LyricsError::Unsupported { .. })
            ));
        }

        #[tokio::test]
        async fn test_mock_provider_counts_searches() {
            let mock = MockProvider::with_results(
                Source::Lrclib,
                vec![sample_result(Source::Lrclib, "1", "Song", "Artist")],
            );
            let results = mock.search(&SearchQuery::new("song")).await.unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(mock.search_calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let mock = MockProvider::with_error(
                Source::Genius,
                LyricsError::unavailable("genius", "HTTP 500"),
            );
            let result = mock.search(&SearchQuery::new("song")).await;
            assert!(matches!(result, Err(LyricsError::ProviderUnavailable { .. })));
        }
    }
}
