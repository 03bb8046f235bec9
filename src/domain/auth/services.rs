use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use super::entities::{Identity, NewUser, Session};
use super::errors::{AuthError, RepositoryError};
use super::ports::{
  AttemptCounterRepository, Clock, PasswordHasher, SessionRepository, UserRepository,
};
use super::value_objects::{ClientAddress, Email, Password, SessionToken, Username};

/// Tunables for login throttling
#[derive(Debug, Clone, Copy)]
pub struct AuthServiceConfig {
  /// Failed attempts allowed per address before it is blocked
  pub max_failed_attempts: u32,
  /// Length of the counting window, in seconds
  pub rate_limit_window_seconds: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      max_failed_attempts: 5,
      rate_limit_window_seconds: 300,
    }
  }
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  attempt_repo: Arc<dyn AttemptCounterRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  clock: Arc<dyn Clock>,
  config: AuthServiceConfig,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    attempt_repo: Arc<dyn AttemptCounterRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      attempt_repo,
      password_hasher,
      clock,
      config,
    }
  }

  fn window(&self) -> Duration {
    Duration::seconds(self.config.rate_limit_window_seconds)
  }

  /// Authenticates a player and opens a new session for them
  ///
  /// # Arguments
  /// * `username` - Account name, matched case-sensitively
  /// * `password` - Plain text password
  /// * `client` - Throttling key of the caller
  /// * `previous_session` - Token the caller currently holds, if any; it is
  ///   destroyed so the session identifier rotates on login
  ///
  /// # Returns
  /// The identity now bound to the session and the new session token
  ///
  /// # Errors
  /// * `AuthError::RateLimitExceeded` - too many recent failures from `client`
  /// * `AuthError::InvalidCredentials` - unknown user or wrong password
  pub async fn authenticate(
    &self,
    username: Username,
    password: Password,
    client: &ClientAddress,
    previous_session: Option<&SessionToken>,
  ) -> Result<(Identity, SessionToken), AuthError> {
    let now = self.clock.now();

    let counter = self.attempt_repo.get(client).await?;
    if let Some(counter) =
      counter.filter(|c| c.is_blocked(now, self.config.max_failed_attempts, self.window()))
    {
      tracing::warn!(
        client = %client,
        attempts = counter.count,
        "Login blocked by rate limit"
      );
      return Err(AuthError::RateLimitExceeded);
    }

    let user = match self.user_repo.find_by_username(&username).await? {
      Some(user) => user,
      None => {
        // Keep the unknown-user path as expensive as a real verification
        let _ = self.password_hasher.digest(&password).await?;
        self.record_failure(client, now).await?;
        return Err(AuthError::InvalidCredentials);
      }
    };

    if !self
      .password_hasher
      .verify(&password, &user.password_digest)
      .await?
    {
      self.record_failure(client, now).await?;
      return Err(AuthError::InvalidCredentials);
    }

    if let Some(previous) = previous_session {
      self.session_repo.delete(&previous.hash()).await?;
    }

    let identity = user.identity();
    let token = SessionToken::generate();
    self
      .session_repo
      .create(&token.hash(), Session::new(identity.clone(), now))
      .await?;

    self.attempt_repo.reset(client, now).await?;

    tracing::info!(user_id = %identity.user_id, client = %client, "Login successful");

    Ok((identity, token))
  }

  async fn record_failure(&self, client: &ClientAddress, now: DateTime<Utc>) -> Result<(), AuthError> {
    let counter = self
      .attempt_repo
      .record_failure(client, now, self.window())
      .await?;

    tracing::debug!(client = %client, attempts = counter.count, "Failed login attempt recorded");

    Ok(())
  }

  /// Creates a new account in the credential store
  ///
  /// No session is opened; the player logs in separately afterwards.
  ///
  /// # Errors
  /// Returns `AuthError::UsernameAlreadyExists` if the name is taken
  pub async fn register(
    &self,
    username: Username,
    password: Password,
    email: Option<Email>,
  ) -> Result<Identity, AuthError> {
    if self.user_repo.exists(&username).await? {
      return Err(AuthError::UsernameAlreadyExists);
    }

    let password_digest = self.password_hasher.digest(&password).await?;

    let new_user = NewUser {
      username: username.clone(),
      password_digest,
      email,
    };

    let user_id = match self.user_repo.create(new_user).await {
      Ok(id) => id,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::UsernameAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    tracing::info!(user_id = %user_id, "Account registered");

    Ok(Identity {
      user_id,
      username: username.into_inner(),
    })
  }

  /// Returns the identity bound to a session token, if the session is live.
  ///
  /// A live session has its idle timer restarted. The bound identity is
  /// never changed here.
  pub async fn current_user(
    &self,
    token: Option<&SessionToken>,
  ) -> Result<Option<Identity>, AuthError> {
    let Some(token) = token else {
      return Ok(None);
    };

    let token_hash = token.hash();
    let Some(session) = self.session_repo.find(&token_hash).await? else {
      return Ok(None);
    };

    self.session_repo.update_activity(&token_hash).await?;

    Ok(Some(session.identity()))
  }

  /// Destroys whatever session the token points at
  pub async fn logout(&self, token: Option<&SessionToken>) -> Result<(), AuthError> {
    if let Some(token) = token {
      self.session_repo.delete(&token.hash()).await?;
    }

    Ok(())
  }
}
