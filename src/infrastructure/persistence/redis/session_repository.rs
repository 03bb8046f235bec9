use ::redis::AsyncCommands;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::SessionRepository;
use crate::domain::auth::value_objects::TokenHash;

const KEY_PREFIX: &str = "costa:session:";

/// Redis implementation of the SessionRepository trait.
///
/// Idle expiry is delegated to Redis key TTLs; every read that finds a
/// session pushes the TTL back.
pub struct RedisSessionRepository {
  conn: ConnectionManager,
  idle_ttl_seconds: u64,
}

impl RedisSessionRepository {
  pub fn new(conn: ConnectionManager, idle_ttl_seconds: u64) -> Self {
    Self {
      conn,
      idle_ttl_seconds,
    }
  }

  fn key(token_hash: &TokenHash) -> String {
    format!("{}{}", KEY_PREFIX, token_hash)
  }
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
  async fn create(&self, token_hash: &TokenHash, session: Session) -> Result<(), AuthError> {
    let payload = serde_json::to_string(&session)
      .map_err(|e| RepositoryError::SessionStore(e.to_string()))?;

    let mut conn = self.conn.clone();
    conn
      .set_ex::<_, _, ()>(Self::key(token_hash), payload, self.idle_ttl_seconds)
      .await?;

    Ok(())
  }

  async fn find(&self, token_hash: &TokenHash) -> Result<Option<Session>, AuthError> {
    let mut conn = self.conn.clone();
    let payload: Option<String> = conn.get(Self::key(token_hash)).await?;

    match payload {
      Some(payload) => {
        let session = serde_json::from_str(&payload).map_err(|e| {
          tracing::warn!(error = %e, "Discarding unreadable session payload");
          RepositoryError::SessionStore(e.to_string())
        })?;
        Ok(Some(session))
      }
      None => Ok(None),
    }
  }

  async fn update_activity(&self, token_hash: &TokenHash) -> Result<(), AuthError> {
    let mut conn = self.conn.clone();
    conn
      .expire::<_, ()>(Self::key(token_hash), self.idle_ttl_seconds as i64)
      .await?;
    Ok(())
  }

  async fn delete(&self, token_hash: &TokenHash) -> Result<(), AuthError> {
    let mut conn = self.conn.clone();
    conn.del::<_, ()>(Self::key(token_hash)).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::Identity;
  use crate::domain::auth::value_objects::{SessionToken, UserId};
  use chrono::Utc;
  use testcontainers_modules::redis::Redis;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_redis() -> (ConnectionManager, ContainerAsync<Redis>) {
    let container = Redis::default()
      .start()
      .await
      .expect("Failed to start redis container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(6379)
      .await
      .expect("Failed to get port");

    let client =
      ::redis::Client::open(format!("redis://{}:{}", host, port)).expect("Invalid redis url");
    let conn = client
      .get_connection_manager()
      .await
      .expect("Failed to connect to redis");

    (conn, container)
  }

  fn session() -> Session {
    Session::new(
      Identity {
        user_id: UserId::new(9),
        username: "alice".to_string(),
      },
      Utc::now(),
    )
  }

  #[test]
  fn test_key_uses_hash_only() {
    let token = SessionToken::generate();
    let key = RedisSessionRepository::key(&token.hash());

    assert!(key.starts_with(KEY_PREFIX));
    assert!(!key.contains(token.as_str()));
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_roundtrip_and_delete() {
    let (conn, _container) = setup_test_redis().await;
    let repo = RedisSessionRepository::new(conn, 60);
    let key = SessionToken::generate().hash();

    repo.create(&key, session()).await.unwrap();
    let found = repo.find(&key).await.unwrap().unwrap();
    assert_eq!(found.user_id, UserId::new(9));
    assert_eq!(found.username, "alice");

    repo.update_activity(&key).await.unwrap();
    repo.delete(&key).await.unwrap();
    assert!(repo.find(&key).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_session_expires_with_key_ttl() {
    let (conn, _container) = setup_test_redis().await;
    let repo = RedisSessionRepository::new(conn, 1);
    let key = SessionToken::generate().hash();

    repo.create(&key, session()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    assert!(repo.find(&key).await.unwrap().is_none());
  }
}
