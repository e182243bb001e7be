//! Lyrics retrieval command.

use serde_json::json;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::ResultExt;
use crate::lyrics::{LyricsRequest, LyricsService, Source};

/// Resolve and print the lyrics of one search result
pub fn cmd_lyrics(
    rt: &Runtime,
    config: &Config,
    source: Source,
    id: &str,
    title: Option<&str>,
    artist: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let service = LyricsService::from_config(config).with_context("building lyrics service")?;
    let request = LyricsRequest {
        source,
        id: id.to_string(),
        title: title.map(String::from),
        artist: artist.map(String::from),
    };

    let lyrics = rt
        .block_on(service.resolve(&request))
        .with_context(format!("fetching {} lyrics for id {}", source, id))?;

    if json {
        let value = json!({ "source": source, "id": id, "lyrics": lyrics });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", lyrics);
    }
    Ok(())
}
