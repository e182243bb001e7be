//! Musixmatch integration
//!
//! Structured track search. Requires an API key.
//!
//! API docs: https://developer.musixmatch.com/documentation

pub mod adapter;
mod client;
pub mod dto;

pub use client::{DEFAULT_BASE_URL, MusixmatchClient};
