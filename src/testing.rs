//! Fakes and wiring shared by unit tests

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::auth::entities::{NewUser, User};
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::services::{AuthService, AuthServiceConfig};
use crate::domain::auth::value_objects::{UserId, Username};
use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::persistence::memory::{
  InMemoryAttemptCounterRepository, InMemorySessionRepository,
};
use crate::infrastructure::security::Sha1PasswordHasher;

#[derive(Debug, Clone)]
struct StoredUser {
  id: i64,
  username: String,
  digest: String,
  email: Option<String>,
}

/// Account table stand-in with exact, case-sensitive matching
#[derive(Default)]
pub struct FakeUserRepository {
  users: Mutex<Vec<StoredUser>>,
  lookups: AtomicUsize,
  offline: AtomicBool,
}

impl FakeUserRepository {
  /// Stores an account with the SHA-1 digest of `password`
  pub fn insert_plain(&self, id: i64, username: &str, password: &str) {
    use sha1::{Digest, Sha1};

    let digest = hex::encode(Sha1::digest(password.as_bytes()));
    self.users.lock().unwrap().push(StoredUser {
      id,
      username: username.to_string(),
      digest,
      email: None,
    });
  }

  /// Number of store queries made so far
  pub fn lookups(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }

  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  pub fn digest_of(&self, username: &str) -> Option<String> {
    self.find(username).map(|user| user.digest)
  }

  pub fn email_of(&self, username: &str) -> Option<String> {
    self.find(username).and_then(|user| user.email)
  }

  /// Makes every later call fail as if the database were down
  pub fn fail_with_connection_error(&self) {
    self.offline.store(true, Ordering::SeqCst);
  }

  fn find(&self, username: &str) -> Option<StoredUser> {
    self
      .users
      .lock()
      .unwrap()
      .iter()
      .find(|user| user.username == username)
      .cloned()
  }

  fn touch(&self) -> Result<(), AuthError> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    if self.offline.load(Ordering::SeqCst) {
      return Err(RepositoryError::ConnectionFailed("connection refused".to_string()).into());
    }
    Ok(())
  }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    self.touch()?;
    Ok(self.find(username.as_str()).map(|user| {
      User::from_db(user.id, user.username, user.digest, user.email)
    }))
  }

  async fn exists(&self, username: &Username) -> Result<bool, AuthError> {
    self.touch()?;
    Ok(self.find(username.as_str()).is_some())
  }

  async fn create(&self, user: NewUser) -> Result<UserId, AuthError> {
    self.touch()?;
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.username == user.username.as_str()) {
      return Err(RepositoryError::DuplicateKey("username".to_string()).into());
    }

    let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    users.push(StoredUser {
      id,
      username: user.username.into_inner(),
      digest: user.password_digest.into_inner(),
      email: user.email.map(|email| email.into_inner()),
    });

    Ok(UserId::new(id))
  }
}

/// An `AuthService` over in-memory stores and a manual clock
pub struct TestHarness {
  pub service: Arc<AuthService>,
  pub users: Arc<FakeUserRepository>,
  pub sessions: Arc<InMemorySessionRepository>,
  pub attempts: Arc<InMemoryAttemptCounterRepository>,
  pub clock: Arc<ManualClock>,
  pub idle_ttl: Duration,
}

impl TestHarness {
  pub fn new() -> Self {
    let config = AuthServiceConfig::default();
    let idle_ttl = Duration::minutes(24);
    let clock = Arc::new(ManualClock::new(
      Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    ));

    let users = Arc::new(FakeUserRepository::default());
    let sessions = Arc::new(InMemorySessionRepository::new(clock.clone(), idle_ttl));
    let attempts = Arc::new(InMemoryAttemptCounterRepository::new(
      clock.clone(),
      Duration::seconds(config.rate_limit_window_seconds),
    ));

    let service = Arc::new(AuthService::new(
      users.clone(),
      sessions.clone(),
      attempts.clone(),
      Arc::new(Sha1PasswordHasher::new()),
      clock.clone(),
      config,
    ));

    Self {
      service,
      users,
      sessions,
      attempts,
      clock,
      idle_ttl,
    }
  }
}
