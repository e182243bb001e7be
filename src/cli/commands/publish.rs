//! Publishing commands.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::ResultExt;
use crate::lyrics::{LyricsService, LyricsSubmission, pow};

/// Track identity and lyric files for a publish
pub struct PublishArgs<'a> {
    pub track: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub duration: f64,
    pub plain: Option<&'a PathBuf>,
    pub synced: Option<&'a PathBuf>,
}

/// Publish lyrics to LRCLIB
pub fn cmd_publish(
    rt: &Runtime,
    config: &Config,
    args: PublishArgs<'_>,
    json: bool,
) -> anyhow::Result<()> {
    let submission = LyricsSubmission {
        track_name: args.track.to_string(),
        artist_name: args.artist.to_string(),
        album_name: args.album.to_string(),
        duration_seconds: args.duration,
        plain_lyrics: read_lyrics_file(args.plain)?,
        synced_lyrics: read_lyrics_file(args.synced)?,
    };
    // Fail on bad input before building clients
    submission.validate()?;

    let service = LyricsService::from_config(config).with_context("building lyrics service")?;
    if !json {
        println!(
            "Publishing '{}' by '{}' (solving challenge, this can take a while)...",
            submission.track_name, submission.artist_name
        );
    }

    let receipt = rt
        .block_on(service.publish(&submission))
        .with_context("publishing to LRCLIB")?;

    if json {
        let value = json!({
            "published": true,
            "nonce": receipt.nonce,
            "token": receipt.token.as_str(),
            "solveMillis": receipt.solve_time.as_millis() as u64,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "✓ Published (nonce {}, solved in {:.1}s)",
            receipt.nonce,
            receipt.solve_time.as_secs_f64()
        );
    }
    Ok(())
}

/// Solve a challenge locally and print the token
pub fn cmd_solve(
    rt: &Runtime,
    config: &Config,
    prefix: &str,
    target: &str,
    max_iterations: Option<u64>,
    sequential: bool,
) -> anyhow::Result<()> {
    let mut limits = config.publish.solve_limits();
    if max_iterations.is_some() {
        limits.max_iterations = max_iterations;
    }
    if sequential {
        limits.parallel = false;
    }

    let prefix_owned = prefix.to_string();
    let target_owned = target.to_string();
    let started = Instant::now();
    let nonce = rt.block_on(async move {
        tokio::task::spawn_blocking(move || {
            pow::solve_bounded(&prefix_owned, &target_owned, &limits, &AtomicBool::new(false))
        })
        .await
    })??;

    println!("Nonce:  {}", nonce);
    println!("Token:  {}:{}", prefix, nonce);
    println!("Digest: {}", hex::encode(pow::digest(prefix, nonce)));
    println!("Time:   {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn read_lyrics_file(path: Option<&PathBuf>) -> anyhow::Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .with_context(format!("reading lyrics from {}", path.display()))?;
    Ok(Some(text))
}
