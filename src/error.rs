//! Application-wide error types.
//!
//! The lyrics pipeline reports [`LyricsError`](crate::lyrics::LyricsError);
//! configuration has its own [`ConfigError`](crate::config::ConfigError).
//! This module aggregates them for the application layer, while the CLI
//! entry point uses `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use lyrics_finder::error::{Result, ResultExt};
//!
//! fn read_lyrics(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_context("reading lyrics file")
//! }
//! ```

use crate::config::ConfigError;
use crate::lyrics::LyricsError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Search, resolution or publishing failed
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    /// Configuration could not be saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an HTTP client error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, LyricsError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Lyrics(e).context(ctx))
    }
}
