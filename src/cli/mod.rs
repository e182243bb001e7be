//! Command-line interface for lyrics-finder.
//!
//! This module provides CLI commands for searching, fetching and
//! publishing lyrics.

mod commands;

pub use commands::{Cli, Commands, run_command};
