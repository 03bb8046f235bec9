use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::entities::{AttemptCounter, NewUser, Session, User};
use super::errors::AuthError;
use super::value_objects::{ClientAddress, Password, PasswordDigest, TokenHash, UserId, Username};

/// Access to the game server's account table
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Finds the single user whose name matches exactly (case-sensitive)
  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

  /// Checks whether the store already holds an account with this name
  async fn exists(&self, username: &Username) -> Result<bool, AuthError>;

  /// Inserts a new account and returns its generated identifier
  async fn create(&self, user: NewUser) -> Result<UserId, AuthError>;
}

/// Server-side session state, keyed by the hash of the cookie token
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Stores a new session under the given key
  async fn create(&self, token_hash: &TokenHash, session: Session) -> Result<(), AuthError>;

  /// Finds a live session; expired sessions are reported as absent
  async fn find(&self, token_hash: &TokenHash) -> Result<Option<Session>, AuthError>;

  /// Marks the session as used now, pushing back its idle expiry
  async fn update_activity(&self, token_hash: &TokenHash) -> Result<(), AuthError>;

  /// Deletes a session; deleting an unknown key is not an error
  async fn delete(&self, token_hash: &TokenHash) -> Result<(), AuthError>;
}

/// Failed-login counters keyed by client address
#[async_trait]
pub trait AttemptCounterRepository: Send + Sync {
  /// Returns the counter for an address, if one was ever recorded
  async fn get(&self, address: &ClientAddress) -> Result<Option<AttemptCounter>, AuthError>;

  /// Atomically records one failed attempt and returns the updated counter
  async fn record_failure(
    &self,
    address: &ClientAddress,
    now: DateTime<Utc>,
    window: Duration,
  ) -> Result<AttemptCounter, AuthError>;

  /// Sets the counter for an address back to zero
  async fn reset(&self, address: &ClientAddress, now: DateTime<Utc>) -> Result<(), AuthError>;
}

/// Produces the password digest the credential store expects
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Computes the digest of a plain text password
  async fn digest(&self, password: &Password) -> Result<PasswordDigest, AuthError>;

  /// Verifies a plain text password against a stored digest
  async fn verify(&self, password: &Password, stored: &PasswordDigest) -> Result<bool, AuthError>;
}

/// Source of the current time, injectable so tests can move it
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}
