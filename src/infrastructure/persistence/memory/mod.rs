//! Process-local stores for session state and login throttling

pub mod attempt_counter_repository;
pub mod session_repository;

pub use attempt_counter_repository::InMemoryAttemptCounterRepository;
pub use session_repository::InMemorySessionRepository;

use std::sync::Arc;
use std::time::Duration;

/// Periodically drops sessions that went idle
pub fn spawn_session_sweeper(
  repo: Arc<InMemorySessionRepository>,
  every: Duration,
) -> tokio::task::JoinHandle<()> {
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(every);
    loop {
      interval.tick().await;
      let purged = repo.purge_expired().await;
      if purged > 0 {
        tracing::debug!(purged, "Expired sessions removed");
      }
    }
  })
}

/// Periodically drops attempt counters whose window has run out
pub fn spawn_counter_pruner(
  repo: Arc<InMemoryAttemptCounterRepository>,
  every: Duration,
) -> tokio::task::JoinHandle<()> {
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(every);
    loop {
      interval.tick().await;
      let pruned = repo.prune_stale().await;
      if pruned > 0 {
        tracing::debug!(pruned, "Stale attempt counters removed");
      }
    }
  })
}
