//! Result normalization: provider records → canonical [`SearchResult`].
//!
//! Provider search endpoints hand back a list of loosely-typed JSON records.
//! Each record is decoded on its own so one malformed entry is dropped
//! instead of failing the whole batch. Field mapping lives in the
//! per-provider adapters; this module only routes records to them.

use serde_json::Value;

use super::domain::{SearchResult, Source};
use super::{genius, lrclib, musixmatch};

/// A single search record in its provider's wire shape.
#[derive(Debug, Clone)]
pub enum RawRecord {
    Lrclib(lrclib::dto::Track),
    Musixmatch(musixmatch::dto::TrackListEntry),
    Genius(genius::dto::Hit),
}

impl RawRecord {
    /// Decode one JSON record for the given provider.
    pub fn decode(source: Source, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match source {
            Source::Lrclib => Self::Lrclib(serde_json::from_value(value)?),
            Source::Musixmatch => Self::Musixmatch(serde_json::from_value(value)?),
            Source::Genius => Self::Genius(serde_json::from_value(value)?),
        })
    }
}

/// Map one record to the canonical shape.
///
/// Returns `None` for records missing identity fields (id, title, artist).
pub fn normalize(record: RawRecord) -> Option<SearchResult> {
    match record {
        RawRecord::Lrclib(track) => lrclib::adapter::to_search_result(track),
        RawRecord::Musixmatch(entry) => musixmatch::adapter::to_search_result(entry.track),
        RawRecord::Genius(hit) => genius::adapter::to_search_result(hit),
    }
}

/// Normalize a batch, preserving provider order and skipping bad records.
pub fn normalize_batch(source: Source, records: Vec<Value>) -> Vec<SearchResult> {
    let total = records.len();
    let results: Vec<SearchResult> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match RawRecord::decode(source, value) {
            Ok(record) => {
                let normalized = normalize(record);
                if normalized.is_none() {
                    tracing::debug!("{}: record {} lacks identity fields, skipped", source, index);
                }
                normalized
            }
            Err(e) => {
                tracing::warn!("{}: malformed record {} skipped: {}", source, index, e);
                None
            }
        })
        .collect();

    tracing::debug!("{}: normalized {}/{} records", source, results.len(), total);
    results
}
