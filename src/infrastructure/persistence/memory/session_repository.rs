use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{Clock, SessionRepository};
use crate::domain::auth::value_objects::TokenHash;

/// Session store held in process memory, with idle expiry
pub struct InMemorySessionRepository {
  sessions: RwLock<HashMap<TokenHash, Session>>,
  clock: Arc<dyn Clock>,
  idle_ttl: Duration,
}

impl InMemorySessionRepository {
  pub fn new(clock: Arc<dyn Clock>, idle_ttl: Duration) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      clock,
      idle_ttl,
    }
  }

  /// Removes every idle session and returns how many were dropped
  pub async fn purge_expired(&self) -> usize {
    let now = self.clock.now();
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, session| !session.is_idle(now, self.idle_ttl));
    before - sessions.len()
  }

  pub async fn len(&self) -> usize {
    self.sessions.read().await.len()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, token_hash: &TokenHash, session: Session) -> Result<(), AuthError> {
    self
      .sessions
      .write()
      .await
      .insert(token_hash.clone(), session);
    Ok(())
  }

  async fn find(&self, token_hash: &TokenHash) -> Result<Option<Session>, AuthError> {
    let now = self.clock.now();
    let sessions = self.sessions.read().await;

    Ok(
      sessions
        .get(token_hash)
        .filter(|session| !session.is_idle(now, self.idle_ttl))
        .cloned(),
    )
  }

  async fn update_activity(&self, token_hash: &TokenHash) -> Result<(), AuthError> {
    let now = self.clock.now();
    if let Some(session) = self.sessions.write().await.get_mut(token_hash) {
      session.touch(now);
    }
    Ok(())
  }

  async fn delete(&self, token_hash: &TokenHash) -> Result<(), AuthError> {
    self.sessions.write().await.remove(token_hash);
    Ok(())
  }
}
