use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::auth::entities::AttemptCounter;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{AttemptCounterRepository, Clock};
use crate::domain::auth::value_objects::ClientAddress;

/// Failed-login counters held in process memory
pub struct InMemoryAttemptCounterRepository {
  counters: RwLock<HashMap<ClientAddress, AttemptCounter>>,
  clock: Arc<dyn Clock>,
  window: Duration,
}

impl InMemoryAttemptCounterRepository {
  pub fn new(clock: Arc<dyn Clock>, window: Duration) -> Self {
    Self {
      counters: RwLock::new(HashMap::new()),
      clock,
      window,
    }
  }

  /// Removes counters whose window has run out and returns how many were dropped
  pub async fn prune_stale(&self) -> usize {
    let now = self.clock.now();
    let mut counters = self.counters.write().await;
    let before = counters.len();
    counters.retain(|_, counter| !counter.is_stale(now, self.window));
    before - counters.len()
  }
}

#[async_trait]
impl AttemptCounterRepository for InMemoryAttemptCounterRepository {
  async fn get(&self, address: &ClientAddress) -> Result<Option<AttemptCounter>, AuthError> {
    Ok(self.counters.read().await.get(address).copied())
  }

  async fn record_failure(
    &self,
    address: &ClientAddress,
    now: DateTime<Utc>,
    window: Duration,
  ) -> Result<AttemptCounter, AuthError> {
    // One write lock covers the whole read-modify-write
    let mut counters = self.counters.write().await;
    let counter = counters
      .entry(address.clone())
      .or_insert_with(|| AttemptCounter::new(now));
    counter.register_failure(now, window);
    Ok(*counter)
  }

  async fn reset(&self, address: &ClientAddress, now: DateTime<Utc>) -> Result<(), AuthError> {
    self
      .counters
      .write()
      .await
      .insert(address.clone(), AttemptCounter::new(now));
    Ok(())
  }
}
