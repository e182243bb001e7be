//! lyrics.ovh integration
//!
//! Plain lyrics lookup by artist and title. Used for hits from providers that
//! return metadata but no lyrics text.
//!
//! API docs: https://lyricsovh.docs.apiary.io

mod client;
pub mod dto;

pub use client::{DEFAULT_BASE_URL, LyricsOvhClient};
