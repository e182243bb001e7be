//! Lyrics service - wires providers, search, resolution and publishing
//! together from the application config.
//!
//! Providers that need a credential are only enabled when one is present;
//! a missing credential disables the provider rather than failing startup.

use std::sync::Arc;

use crate::config::{Config, HttpConfig};
use crate::error::{Error, Result};
use crate::lyrics::{
    domain::{LyricsError, LyricsSubmission, SearchQuery, Source},
    genius::GeniusClient,
    lrclib::LrclibClient,
    lyrics_ovh::LyricsOvhClient,
    musixmatch::MusixmatchClient,
    publish::{PublishCoordinator, PublishReceipt},
    resolver::{LyricsRequest, LyricsResolver},
    search::{SearchAggregator, SearchOutcome},
    traits::LyricsProvider,
};

/// High-level entry point for the lyrics pipeline
pub struct LyricsService {
    aggregator: SearchAggregator,
    resolver: LyricsResolver,
    publisher: PublishCoordinator,
}

impl LyricsService {
    pub fn new(
        aggregator: SearchAggregator,
        resolver: LyricsResolver,
        publisher: PublishCoordinator,
    ) -> Self {
        Self {
            aggregator,
            resolver,
            publisher,
        }
    }

    /// Build every component from `config`, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client(&config.http)?;
        let providers = &config.providers;

        let lrclib = Arc::new(LrclibClient::new(http.clone(), &providers.lrclib.base_url));

        let musixmatch = match non_empty(&providers.musixmatch.api_key) {
            Some(key) => Some(Arc::new(MusixmatchClient::new(
                http.clone(),
                &providers.musixmatch.base_url,
                key,
            ))),
            None => {
                tracing::debug!("No Musixmatch API key, provider disabled");
                None
            }
        };

        let genius = match non_empty(&providers.genius.access_token) {
            Some(token) => Some(Arc::new(GeniusClient::new(
                http.clone(),
                &providers.genius.base_url,
                token,
            ))),
            None => {
                tracing::debug!("No Genius access token, provider disabled");
                None
            }
        };

        let mut search_providers: Vec<Arc<dyn LyricsProvider>> = Vec::new();
        for source in Source::ALL {
            if !config.search.is_enabled(source) {
                continue;
            }
            let provider: Option<Arc<dyn LyricsProvider>> = match source {
                Source::Lrclib => Some(lrclib.clone() as Arc<dyn LyricsProvider>),
                Source::Musixmatch => musixmatch.clone().map(|p| p as Arc<dyn LyricsProvider>),
                Source::Genius => genius.clone().map(|p| p as Arc<dyn LyricsProvider>),
            };
            match provider {
                Some(p) => search_providers.push(p),
                None => tracing::debug!("{} enabled for search but not configured", source),
            }
        }

        let aggregator = SearchAggregator::new(search_providers)
            .with_timeout(config.search.timeout())
            .with_policy(config.search.failure_policy);

        let mut resolver = LyricsResolver::new()
            .with_lrclib(lrclib.clone())
            .with_lookup(Arc::new(LyricsOvhClient::new(
                http,
                &providers.lyrics_ovh.base_url,
            )));
        if let Some(genius) = genius {
            resolver = resolver.with_genius(genius.clone(), genius);
        }

        let publisher = PublishCoordinator::new(lrclib, config.publish.solve_limits());

        Ok(Self::new(aggregator, resolver, publisher))
    }

    /// Sources a search will query
    pub fn search_sources(&self) -> Vec<Source> {
        self.aggregator.sources()
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<SearchOutcome, LyricsError> {
        self.aggregator.search(query).await
    }

    pub async fn resolve(
        &self,
        request: &LyricsRequest,
    ) -> std::result::Result<String, LyricsError> {
        self.resolver.resolve(request).await
    }

    pub async fn publish(
        &self,
        submission: &LyricsSubmission,
    ) -> std::result::Result<PublishReceipt, LyricsError> {
        self.publisher.publish(submission).await
    }
}

/// Shared HTTP client with the configured user agent and connect timeout
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(config.connect_timeout())
        .build()
        .map_err(|e| Error::http(e.to_string()))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
