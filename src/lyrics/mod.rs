//! Lyrics pipeline - searches several lyrics providers at once, resolves
//! lyrics for a chosen result and publishes new lyrics.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Our types, independent of any provider
//! - **Provider DTOs** (`lrclib/dto.rs`, `genius/dto.rs`, ...) - Exact API shapes
//! - **Adapters** - The only place DTOs become domain models
//! - **Clients** - HTTP clients behind the seams in `traits.rs`
//! - **Search** - Concurrent fan-out with fixed merge order
//! - **Resolver** - Per-source lyrics retrieval, including page scraping
//! - **Publish** - Challenge, proof-of-work and submission
//! - **Service** - Everything wired together from the config
//!
//! # Usage
//!
//! ```ignore
//! use lyrics::{LyricsService, SearchQuery, LyricsRequest};
//!
//! let service = LyricsService::from_config(&config::load())?;
//! let outcome = service.search(&SearchQuery::new("Yesterday")).await?;
//! let first = &outcome.results[0];
//! let request = LyricsRequest::new(first.source, &first.id)
//!     .with_metadata(&first.title, &first.artist);
//! println!("{}", service.resolve(&request).await?);
//! ```

pub mod domain;
pub mod genius;
pub mod lrclib;
pub mod lyrics_ovh;
pub mod musixmatch;
pub mod normalize;
pub mod pow;
pub mod publish;
pub mod resolver;
pub mod scrape;
pub mod search;
pub mod service;
pub mod traits;

pub use domain::{
    Challenge, LyricsError, LyricsSubmission, PublishToken, SearchQuery, SearchResult, Source,
    TrackDetails, Views, top_artists,
};
pub use pow::SolveLimits;
pub use publish::{PublishCoordinator, PublishReceipt};
pub use resolver::{LyricsRequest, LyricsResolver};
pub use search::{FailurePolicy, ProviderFailure, SearchAggregator, SearchOutcome};
pub use service::LyricsService;
