//! Genius integration
//!
//! Song search and metadata via the API; lyrics come from the song page.
//!
//! API docs: https://docs.genius.com

pub mod adapter;
mod client;
pub mod dto;

pub use client::{DEFAULT_BASE_URL, GeniusClient};
