//! Lyrics resolution for a selected search result.
//!
//! Which strategy applies depends only on the result's source:
//!
//! | Source     | Strategy                                                  |
//! |------------|-----------------------------------------------------------|
//! | LRCLIB     | fetch by id, return synced lyrics (plain as fallback)     |
//! | Musixmatch | title/artist lookup on the lyrics lookup service          |
//! | Genius     | fetch song by id, scrape its web page                     |

use std::sync::Arc;

use super::domain::{LyricsError, Source};
use super::scrape;
use super::traits::{LyricsLookupApi, LyricsProvider, PageFetcher};

/// Which result to fetch lyrics for
#[derive(Debug, Clone, PartialEq)]
pub struct LyricsRequest {
    pub source: Source,
    /// Provider-specific id
    pub id: String,
    /// Needed for sources resolved by title/artist
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl LyricsRequest {
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
            title: None,
            artist: None,
        }
    }

    pub fn with_metadata(mut self, title: impl Into<String>, artist: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.artist = Some(artist.into());
        self
    }
}

/// Stateless dispatcher from a [`LyricsRequest`] to lyrics text.
#[derive(Default)]
pub struct LyricsResolver {
    lrclib: Option<Arc<dyn LyricsProvider>>,
    genius: Option<(Arc<dyn LyricsProvider>, Arc<dyn PageFetcher>)>,
    lookup: Option<Arc<dyn LyricsLookupApi>>,
}

impl LyricsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lrclib(mut self, provider: Arc<dyn LyricsProvider>) -> Self {
        self.lrclib = Some(provider);
        self
    }

    /// Genius needs both the API (song → page URL) and a page fetcher
    pub fn with_genius(
        mut self,
        provider: Arc<dyn LyricsProvider>,
        pages: Arc<dyn PageFetcher>,
    ) -> Self {
        self.genius = Some((provider, pages));
        self
    }

    pub fn with_lookup(mut self, lookup: Arc<dyn LyricsLookupApi>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Resolve lyrics text, outer whitespace trimmed.
    pub async fn resolve(&self, request: &LyricsRequest) -> Result<String, LyricsError> {
        tracing::info!("Resolving {} lyrics for id {}", request.source, request.id);

        let text = match request.source {
            Source::Lrclib => self.resolve_lrclib(&request.id).await?,
            Source::Musixmatch => self.resolve_by_lookup(request).await?,
            Source::Genius => self.resolve_genius(&request.id).await?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(LyricsError::LyricsNotFound);
        }
        Ok(text.to_string())
    }

    async fn resolve_lrclib(&self, id: &str) -> Result<String, LyricsError> {
        let provider = self.lrclib.as_ref().ok_or_else(|| not_configured(Source::Lrclib))?;
        let track = provider.fetch_by_id(id).await?;

        track
            .synced_lyrics
            .filter(|l| !l.trim().is_empty())
            .or_else(|| {
                tracing::debug!("lrclib track {} has no synced lyrics, using plain", id);
                track.plain_lyrics.filter(|l| !l.trim().is_empty())
            })
            .ok_or(LyricsError::LyricsNotFound)
    }

    async fn resolve_by_lookup(&self, request: &LyricsRequest) -> Result<String, LyricsError> {
        let (Some(title), Some(artist)) = (
            request.title.as_deref().filter(|t| !t.trim().is_empty()),
            request.artist.as_deref().filter(|a| !a.trim().is_empty()),
        ) else {
            return Err(LyricsError::Validation(format!(
                "{} lyrics need both title and artist",
                request.source
            )));
        };

        let lookup = self.lookup.as_ref().ok_or_else(|| not_configured(request.source))?;
        lookup.lookup(title, artist).await
    }

    async fn resolve_genius(&self, id: &str) -> Result<String, LyricsError> {
        let (provider, pages) = self.genius.as_ref().ok_or_else(|| not_configured(Source::Genius))?;

        let song = provider.fetch_by_id(id).await?;
        let Some(url) = song.url.as_deref() else {
            tracing::warn!("Genius song {} has no page URL", id);
            return Err(LyricsError::LyricsNotFound);
        };

        let html = pages.fetch_html(url).await?;
        let lyrics = scrape::extract(&html)?;

        tracing::debug!(
            "Lyrics fetched for '{}' by '{}':\n{}",
            song.title,
            song.artist,
            lyrics
        );
        Ok(lyrics)
    }
}

fn not_configured(source: Source) -> LyricsError {
    LyricsError::unavailable(source.as_str(), "not configured")
}
