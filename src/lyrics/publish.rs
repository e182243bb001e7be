//! Lyrics publishing: validate → challenge → solve → publish.
//!
//! Each step runs only if the previous one succeeded. Validation happens
//! before any network call, and a failed publish is never retried since it
//! would need a fresh challenge.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::domain::{LyricsError, LyricsSubmission, PublishToken};
use super::pow::{self, SolveLimits};
use super::traits::LyricsProvider;

/// What a successful publish produced
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReceipt {
    /// Nonce that solved the challenge
    pub nonce: u64,
    /// Token sent with the submission
    pub token: PublishToken,
    /// Time spent solving the challenge
    pub solve_time: Duration,
}

/// Drives a single submission through the publish protocol.
pub struct PublishCoordinator {
    provider: Arc<dyn LyricsProvider>,
    limits: SolveLimits,
}

impl PublishCoordinator {
    pub fn new(provider: Arc<dyn LyricsProvider>, limits: SolveLimits) -> Self {
        Self { provider, limits }
    }

    pub async fn publish(
        &self,
        submission: &LyricsSubmission,
    ) -> Result<PublishReceipt, LyricsError> {
        submission.validate()?;

        tracing::info!(
            "Publishing lyrics for '{}' by '{}' to {}",
            submission.track_name,
            submission.artist_name,
            self.provider.source()
        );

        let challenge = self.provider.fetch_challenge().await?;
        tracing::debug!(
            "Got challenge prefix={} target={}",
            challenge.prefix,
            challenge.target_hex
        );

        let started = Instant::now();
        let nonce = pow::solve_challenge(&challenge, self.limits.clone()).await?;
        let solve_time = started.elapsed();
        tracing::info!("Solved challenge with nonce {} in {:?}", nonce, solve_time);

        let token = PublishToken::new(&challenge, nonce);
        self.provider.publish(&token, submission).await?;

        tracing::info!("Lyrics published");
        Ok(PublishReceipt {
            nonce,
            token,
            solve_time,
        })
    }
}
