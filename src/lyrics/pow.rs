//! Proof-of-work challenge solver.
//!
//! A challenge is a `(prefix, target)` pair. The solution is the smallest
//! nonce `n >= 0` whose SHA-256 digest of `"{prefix}:{n}"` compares
//! byte-wise less than or equal to the decoded target (see [`accepts`]).
//!
//! Solving is CPU-bound and, left alone, unbounded. [`solve_bounded`] adds an
//! iteration cap, a wall-clock budget and a cancellation flag;
//! [`solve_challenge`] runs it on the blocking pool and cancels the search
//! when the caller stops waiting.

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use sha2::{Digest, Sha256};

use super::domain::{Challenge, LyricsError};

/// How often (in nonces) the sequential solver checks limits
const CHECK_INTERVAL: u64 = 4096;

/// Nonces handed to rayon per parallel batch
const PARALLEL_BATCH: u64 = 1 << 16;

/// Bounds on a single solve
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveLimits {
    /// Give up after this many nonces
    pub max_iterations: Option<u64>,
    /// Give up after this much wall-clock time
    pub timeout: Option<Duration>,
    /// Search batches of nonces across the rayon pool
    pub parallel: bool,
}

impl SolveLimits {
    /// No bounds at all
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Difficulty predicate: byte-wise `digest <= target`.
///
/// The first differing byte decides. If one input is a prefix of the other,
/// only equal lengths are accepted.
pub fn accepts(digest: &[u8], target: &[u8]) -> bool {
    for (d, t) in digest.iter().zip(target) {
        match d.cmp(t) {
            CmpOrdering::Greater => return false,
            CmpOrdering::Less => return true,
            CmpOrdering::Equal => {}
        }
    }
    digest.len() == target.len()
}

/// SHA-256 of `"{prefix}:{nonce}"`
pub fn digest(prefix: &str, nonce: u64) -> [u8; 32] {
    NonceHasher::new(prefix).digest(nonce)
}

/// Decode a hex target. Case-insensitive.
pub fn decode_target(target_hex: &str) -> Result<Vec<u8>, LyricsError> {
    let trimmed = target_hex.trim();
    if trimmed.is_empty() {
        return Err(LyricsError::InvalidChallenge("empty target".to_string()));
    }
    hex::decode(trimmed).map_err(|e| LyricsError::InvalidChallenge(format!("target: {}", e)))
}

/// Find the smallest accepted nonce with no bounds.
pub fn solve(prefix: &str, target_hex: &str) -> Result<u64, LyricsError> {
    solve_bounded(prefix, target_hex, &SolveLimits::unbounded(), &AtomicBool::new(false))
}

/// Find the smallest accepted nonce within `limits`.
///
/// Fails with `ChallengeTooHard` when the iteration cap or time budget runs
/// out and with `Cancelled` once `cancel` is set.
pub fn solve_bounded(
    prefix: &str,
    target_hex: &str,
    limits: &SolveLimits,
    cancel: &AtomicBool,
) -> Result<u64, LyricsError> {
    let target = decode_target(target_hex)?;
    let hasher = NonceHasher::new(prefix);
    let deadline = limits.timeout.map(|t| Instant::now() + t);

    let started = Instant::now();
    let result = if limits.parallel {
        solve_parallel(&hasher, &target, limits.max_iterations, deadline, cancel)
    } else {
        solve_sequential(&hasher, &target, limits.max_iterations, deadline, cancel)
    };

    match &result {
        Ok(nonce) => tracing::debug!(
            "Solved challenge with nonce {} in {:?}",
            nonce,
            started.elapsed()
        ),
        Err(e) => tracing::debug!("Challenge not solved after {:?}: {}", started.elapsed(), e),
    }
    result
}

/// Solve on the blocking pool. Dropping the returned future cancels the search.
pub async fn solve_challenge(
    challenge: &Challenge,
    limits: SolveLimits,
) -> Result<u64, LyricsError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(Arc::clone(&cancel));

    let prefix = challenge.prefix.clone();
    let target = challenge.target_hex.clone();
    tokio::task::spawn_blocking(move || solve_bounded(&prefix, &target, &limits, &cancel))
        .await
        .map_err(|e| {
            tracing::error!("Solver task failed: {}", e);
            LyricsError::Cancelled
        })?
}

/// Sets the flag when dropped
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// SHA-256 state with `"{prefix}:"` already absorbed
#[derive(Clone)]
struct NonceHasher {
    base: Sha256,
}

impl NonceHasher {
    fn new(prefix: &str) -> Self {
        let mut base = Sha256::new();
        base.update(prefix.as_bytes());
        base.update(b":");
        Self { base }
    }

    fn digest(&self, nonce: u64) -> [u8; 32] {
        self.base
            .clone()
            .chain_update(nonce.to_string().as_bytes())
            .finalize()
            .into()
    }
}

fn check_limits(
    checked: u64,
    deadline: Option<Instant>,
    cancel: &AtomicBool,
) -> Result<(), LyricsError> {
    if cancel.load(Ordering::Relaxed) {
        return Err(LyricsError::Cancelled);
    }
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Err(LyricsError::ChallengeTooHard { iterations: checked });
    }
    Ok(())
}

fn solve_sequential(
    hasher: &NonceHasher,
    target: &[u8],
    max_iterations: Option<u64>,
    deadline: Option<Instant>,
    cancel: &AtomicBool,
) -> Result<u64, LyricsError> {
    let mut nonce: u64 = 0;
    loop {
        if max_iterations.is_some_and(|max| nonce >= max) {
            return Err(LyricsError::ChallengeTooHard { iterations: nonce });
        }
        if nonce % CHECK_INTERVAL == 0 {
            check_limits(nonce, deadline, cancel)?;
        }
        if accepts(&hasher.digest(nonce), target) {
            return Ok(nonce);
        }
        nonce = nonce
            .checked_add(1)
            .ok_or(LyricsError::ChallengeTooHard { iterations: u64::MAX })?;
    }
}

/// Batched parallel search. `find_first` keeps the lowest match of a batch,
/// and batches run in ascending order, so the answer equals the sequential one.
fn solve_parallel(
    hasher: &NonceHasher,
    target: &[u8],
    max_iterations: Option<u64>,
    deadline: Option<Instant>,
    cancel: &AtomicBool,
) -> Result<u64, LyricsError> {
    let limit = max_iterations.unwrap_or(u64::MAX);
    let mut start: u64 = 0;
    loop {
        check_limits(start, deadline, cancel)?;

        let end = start.saturating_add(PARALLEL_BATCH).min(limit);
        if start >= end {
            return Err(LyricsError::ChallengeTooHard { iterations: start });
        }

        let found = (start..end)
            .into_par_iter()
            .find_first(|&nonce| accepts(&hasher.digest(nonce), target));
        if let Some(nonce) = found {
            return Ok(nonce);
        }
        start = end;
    }
}
