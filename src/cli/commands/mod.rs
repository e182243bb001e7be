//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: Multi-provider search
//! - `fetch`: Lyrics for one search result
//! - `publish`: Publishing lyrics and solving challenges by hand
//! - `settings`: Config file management

mod fetch;
mod publish;
mod search;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::lyrics::Source;

pub use fetch::cmd_lyrics;
pub use publish::{cmd_publish, cmd_solve};
pub use search::cmd_search;
pub use settings::cmd_config;

/// Lyrics Finder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Genius API access token (or set GENIUS_ACCESS_TOKEN env var)
    #[arg(long, global = true, env = "GENIUS_ACCESS_TOKEN", hide_env_values = true)]
    pub genius_token: Option<String>,

    /// Musixmatch API key (or set MUSIXMATCH_API_KEY env var)
    #[arg(long, global = true, env = "MUSIXMATCH_API_KEY", hide_env_values = true)]
    pub musixmatch_key: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search all configured providers
    Search {
        /// Free-text query (title, artist, or both)
        query: String,
        /// Result page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch lyrics for a search result
    Lyrics {
        /// Result source: lrclib, musixmatch or genius
        source: Source,
        /// Provider-specific id from the search results
        id: String,
        /// Track title (needed for musixmatch)
        #[arg(long)]
        title: Option<String>,
        /// Artist name (needed for musixmatch)
        #[arg(long)]
        artist: Option<String>,
        /// Print lyrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Publish lyrics to LRCLIB
    Publish {
        /// Track title
        #[arg(long)]
        track: String,
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Album name
        #[arg(long)]
        album: String,
        /// Track duration in seconds
        #[arg(long)]
        duration: f64,
        /// File with plain lyrics
        #[arg(long)]
        plain: Option<PathBuf>,
        /// File with synced (LRC) lyrics
        #[arg(long)]
        synced: Option<PathBuf>,
        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve a proof-of-work challenge locally
    Solve {
        /// Challenge prefix
        prefix: String,
        /// Hex target
        target: String,
        /// Give up after this many nonces
        #[arg(long)]
        max_iterations: Option<u64>,
        /// Search on a single thread
        #[arg(long)]
        sequential: bool,
    },
    /// Show or initialize the config file
    Config {
        /// Write the default config if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli);
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Search { query, page, json } => cmd_search(&rt, &config, query, *page, *json),
        Commands::Lyrics {
            source,
            id,
            title,
            artist,
            json,
        } => cmd_lyrics(
            &rt,
            &config,
            *source,
            id,
            title.as_deref(),
            artist.as_deref(),
            *json,
        ),
        Commands::Publish {
            track,
            artist,
            album,
            duration,
            plain,
            synced,
            json,
        } => cmd_publish(
            &rt,
            &config,
            publish::PublishArgs {
                track,
                artist,
                album,
                duration: *duration,
                plain: plain.as_ref(),
                synced: synced.as_ref(),
            },
            *json,
        ),
        Commands::Solve {
            prefix,
            target,
            max_iterations,
            sequential,
        } => cmd_solve(&rt, &config, prefix, target, *max_iterations, *sequential),
        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), *init),
    }
}

/// Load the config file and overlay credentials given on the command line
fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    apply_credentials(
        &mut config,
        cli.genius_token.as_deref(),
        cli.musixmatch_key.as_deref(),
    );
    config
}

fn apply_credentials(
    config: &mut Config,
    genius_token: Option<&str>,
    musixmatch_key: Option<&str>,
) {
    if let Some(token) = genius_token {
        config.providers.genius.access_token = Some(token.to_string());
    }
    if let Some(key) = musixmatch_key {
        config.providers.musixmatch.api_key = Some(key.to_string());
    }
}
