//! Lyrics Finder - search, fetch and publish song lyrics.
//!
//! Searches LRCLIB, Musixmatch and Genius at once, resolves lyrics for a
//! chosen result (scraping the song page where no API offers them) and
//! publishes new lyrics to LRCLIB after solving its proof-of-work challenge.

pub mod cli;
pub mod config;
pub mod error;
pub mod lyrics;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    let directive = format!("lyrics_finder={}", level).parse()?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive))
        .init();

    cli::run_command(&args)
}
