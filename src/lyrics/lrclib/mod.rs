//! LRCLIB integration
//!
//! Synced-lyrics search, lookup by id, and proof-of-work gated publishing.
//!
//! API docs: https://lrclib.net/docs

pub mod adapter;
mod client;
pub mod dto;

pub use client::{DEFAULT_BASE_URL, LrclibClient};
