use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Email, PasswordDigest, UserId, Username};

/// User record read from the game server's account table
#[derive(Debug, Clone)]
pub struct User {
  /// Integer primary key of the record
  pub id: UserId,
  /// Account name, exactly as stored
  pub username: String,
  /// Stored password credential
  pub password_digest: PasswordDigest,
  /// Email address, when the table carries one
  pub email: Option<String>,
}

impl User {
  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: i64,
    username: String,
    password_digest: String,
    email: Option<String>,
  ) -> Self {
    Self {
      id: UserId::new(id),
      username,
      password_digest: PasswordDigest::from_stored(password_digest),
      email,
    }
  }

  pub fn identity(&self) -> Identity {
    Identity {
      user_id: self.id,
      username: self.username.clone(),
    }
  }
}

/// Data needed to insert a brand new account
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username: Username,
  pub password_digest: PasswordDigest,
  pub email: Option<Email>,
}

/// Who is logged in on a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub user_id: UserId,
  pub username: String,
}

/// Server-side state of an authenticated session.
///
/// Anonymous visitors have no session record at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub user_id: UserId,
  pub username: String,
  pub created_at: DateTime<Utc>,
  pub last_seen_at: DateTime<Utc>,
}

impl Session {
  pub fn new(identity: Identity, now: DateTime<Utc>) -> Self {
    Self {
      user_id: identity.user_id,
      username: identity.username,
      created_at: now,
      last_seen_at: now,
    }
  }

  pub fn identity(&self) -> Identity {
    Identity {
      user_id: self.user_id,
      username: self.username.clone(),
    }
  }

  /// Checks whether the session went unused for longer than `idle_ttl`
  pub fn is_idle(&self, now: DateTime<Utc>, idle_ttl: Duration) -> bool {
    now - self.last_seen_at > idle_ttl
  }

  pub fn touch(&mut self, now: DateTime<Utc>) {
    self.last_seen_at = now;
  }
}

/// Failed login attempts seen from one client address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptCounter {
  pub count: u32,
  pub window_start: DateTime<Utc>,
}

impl AttemptCounter {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      count: 0,
      window_start: now,
    }
  }

  /// Blocked while `max_attempts` failures are on record and the window
  /// that started them is still open.
  pub fn is_blocked(&self, now: DateTime<Utc>, max_attempts: u32, window: Duration) -> bool {
    self.count >= max_attempts && now - self.window_start < window
  }

  /// Counts one more failure, opening a fresh window once the old one has
  /// run out.
  pub fn register_failure(&mut self, now: DateTime<Utc>, window: Duration) {
    if now - self.window_start > window {
      self.count = 1;
      self.window_start = now;
    } else {
      self.count = self.count.saturating_add(1);
    }
  }

  /// Stale counters carry no information and can be dropped from the store
  pub fn is_stale(&self, now: DateTime<Utc>, window: Duration) -> bool {
    now - self.window_start > window
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn window() -> Duration {
    Duration::seconds(300)
  }

  #[test]
  fn test_user_identity() {
    let user = User::from_db(
      7,
      "alice".to_string(),
      "digest".to_string(),
      Some("alice@costa.gg".to_string()),
    );

    let identity = user.identity();
    assert_eq!(identity.user_id, UserId::new(7));
    assert_eq!(identity.username, "alice");
  }

  #[test]
  fn test_session_idle_expiry() {
    let start = Utc::now();
    let mut session = Session::new(
      Identity {
        user_id: UserId::new(1),
        username: "alice".to_string(),
      },
      start,
    );

    let ttl = Duration::minutes(24);
    assert!(!session.is_idle(start + Duration::minutes(10), ttl));
    assert!(session.is_idle(start + Duration::minutes(25), ttl));

    session.touch(start + Duration::minutes(20));
    assert!(!session.is_idle(start + Duration::minutes(25), ttl));
  }

  #[test]
  fn test_first_failure_counts_one() {
    let now = Utc::now();
    let mut counter = AttemptCounter::new(now);
    counter.register_failure(now, window());

    assert_eq!(counter.count, 1);
    assert_eq!(counter.window_start, now);
  }

  #[test]
  fn test_blocked_after_max_failures_inside_window() {
    let start = Utc::now();
    let mut counter = AttemptCounter::new(start);
    for i in 0..5 {
      counter.register_failure(start + Duration::seconds(i), window());
    }

    assert_eq!(counter.count, 5);
    assert!(counter.is_blocked(start + Duration::seconds(10), 5, window()));
    assert!(counter.is_blocked(start + Duration::seconds(299), 5, window()));
    assert!(!counter.is_blocked(start + Duration::seconds(300), 5, window()));
  }

  #[test]
  fn test_failure_after_window_restarts_count() {
    let start = Utc::now();
    let mut counter = AttemptCounter::new(start);
    for _ in 0..5 {
      counter.register_failure(start, window());
    }

    let later = start + Duration::seconds(301);
    counter.register_failure(later, window());

    assert_eq!(counter.count, 1);
    assert_eq!(counter.window_start, later);
    assert!(!counter.is_blocked(later, 5, window()));
  }

  #[test]
  fn test_stale_counter() {
    let start = Utc::now();
    let counter = AttemptCounter::new(start);

    assert!(!counter.is_stale(start + Duration::seconds(300), window()));
    assert!(counter.is_stale(start + Duration::seconds(301), window()));
  }
}
