//! Multi-provider search command.

use serde_json::json;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::ResultExt;
use crate::lyrics::{LyricsService, SearchOutcome, SearchQuery};

/// Search every configured provider and print the merged results
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let service = LyricsService::from_config(config).with_context("building lyrics service")?;
    let query = SearchQuery::new(query).with_page(page);

    let outcome = rt
        .block_on(service.search(&query))
        .with_context(format!("searching for {:?}", query.text))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
        return Ok(());
    }

    if outcome.results.is_empty() {
        println!("No results for {:?}", query.text);
    } else {
        println!("Found {} result(s):", outcome.results.len());
        println!();
        for result in &outcome.results {
            let album = result.album.as_deref().unwrap_or("-");
            println!(
                "  [{}] {} - {} ({}) id={} views={}",
                result.source, result.artist, result.title, album, result.id, result.views
            );
        }
    }

    if !outcome.top_artists.is_empty() {
        println!();
        println!("Top artists: {}", outcome.top_artists.join(", "));
    }

    if outcome.is_partial() {
        eprintln!();
        eprintln!("Warning: results are incomplete");
        for failure in &outcome.failures {
            eprintln!("  {} skipped: {}", failure.source, failure.error);
        }
    }
    Ok(())
}

fn outcome_json(outcome: &SearchOutcome) -> serde_json::Value {
    let failures: Vec<_> = outcome
        .failures
        .iter()
        .map(|f| json!({ "source": f.source, "error": f.error.to_string() }))
        .collect();

    json!({
        "results": outcome.results,
        "topArtists": outcome.top_artists,
        "failures": failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{LyricsError, ProviderFailure, Source};
    use crate::test_utils::sample_result;

    #[test]
    fn test_outcome_json_shape() {
        let outcome = SearchOutcome {
            results: vec![sample_result(Source::Lrclib, "3396226", "Yesterday", "The Beatles")],
            top_artists: vec!["The Beatles".to_string()],
            failures: vec![ProviderFailure {
                source: Source::Genius,
                error: LyricsError::unavailable("genius", "HTTP 500"),
            }],
        };

        let value = outcome_json(&outcome);

        assert_eq!(value["results"][0]["id"], "3396226");
        assert_eq!(value["results"][0]["source"], "lrclib");
        assert_eq!(value["topArtists"][0], "The Beatles");
        assert_eq!(value["failures"][0]["source"], "genius");
    }
}
