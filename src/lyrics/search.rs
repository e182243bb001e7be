//! Concurrent search across all configured providers.
//!
//! Every provider is queried at once, each under its own timeout. Results
//! are merged in fixed source priority (LRCLIB, Musixmatch, Genius) no matter
//! which provider answered first, and are never de-duplicated across
//! providers since each source offers different capabilities.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::domain::{LyricsError, SearchQuery, SearchResult, Source, top_artists};
use super::traits::LyricsProvider;

/// Default per-provider timeout
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// What to do when a provider fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop the failed provider and report it alongside the results
    #[default]
    Skip,
    /// Fail the whole search on the first provider failure
    FailFast,
}

/// A provider that failed during a search
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    pub source: Source,
    pub error: LyricsError,
}

/// Merged search results
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Normalized results in source priority order
    pub results: Vec<SearchResult>,
    /// First distinct artists of `results`
    pub top_artists: Vec<String>,
    /// Providers skipped under [`FailurePolicy::Skip`]
    pub failures: Vec<ProviderFailure>,
}

impl SearchOutcome {
    /// True when some providers were skipped
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Fans a query out to every provider and merges the answers.
pub struct SearchAggregator {
    providers: Vec<Arc<dyn LyricsProvider>>,
    timeout: Duration,
    policy: FailurePolicy,
}

impl SearchAggregator {
    pub fn new(providers: Vec<Arc<dyn LyricsProvider>>) -> Self {
        Self {
            providers,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sources that will be queried, in priority order
    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self.providers.iter().map(|p| p.source()).collect();
        sources.sort_by_key(|s| s.priority());
        sources
    }

    /// Search all providers concurrently.
    ///
    /// An empty result set is a valid outcome; it is never used to signal a
    /// failure. If every provider fails the search fails too, whatever the policy.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, LyricsError> {
        if query.text.trim().is_empty() {
            return Err(LyricsError::Validation("search query is empty".to_string()));
        }
        if self.providers.is_empty() {
            return Err(LyricsError::Validation(
                "no search providers configured".to_string(),
            ));
        }

        tracing::info!(
            "Searching {} provider(s) for {:?} (page {})",
            self.providers.len(),
            query.text,
            query.page
        );

        let timeout = self.timeout;
        let calls = self.providers.iter().map(|provider| async move {
            let source = provider.source();
            let outcome = match tokio::time::timeout(timeout, provider.search(query)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(LyricsError::unavailable(
                    source.as_str(),
                    format!("timed out after {:?}", timeout),
                )),
            };
            (source, outcome)
        });

        let mut answers = join_all(calls).await;
        // Stable sort: results within one provider keep their order
        answers.sort_by_key(|(source, _)| source.priority());

        let mut outcome = SearchOutcome::default();
        for (source, answer) in answers {
            match answer {
                Ok(results) => {
                    tracing::debug!("{} returned {} result(s)", source, results.len());
                    outcome.results.extend(results);
                }
                Err(error) => {
                    if self.policy == FailurePolicy::FailFast {
                        tracing::warn!("{} failed, aborting search: {}", source, error);
                        return Err(error);
                    }
                    tracing::warn!("{} failed, skipping: {}", source, error);
                    outcome.failures.push(ProviderFailure { source, error });
                }
            }
        }

        if outcome.failures.len() == self.providers.len() {
            let reasons: Vec<String> = outcome
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.source, f.error))
                .collect();
            return Err(LyricsError::unavailable("all", reasons.join("; ")));
        }

        outcome.top_artists = top_artists(&outcome.results);
        tracing::info!(
            "Search returned {} result(s), {} provider failure(s)",
            outcome.results.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}
