use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Username already exists")]
  UsernameAlreadyExists,

  #[error("Rate limit exceeded, please try again later")]
  RateLimitExceeded,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),

  #[error("Table `{table}` is missing expected columns: {}", missing.join(", "))]
  SchemaMismatch { table: String, missing: Vec<String> },

  #[error("Invalid identifier in credential schema: {0}")]
  InvalidIdentifier(String),

  #[error("Session store error: {0}")]
  SessionStore(String),
}

impl RepositoryError {
  /// True when the backing store could not be reached at all
  pub fn is_connection_failure(&self) -> bool {
    matches!(self, RepositoryError::ConnectionFailed(_))
  }
}

impl AuthError {
  pub fn is_connection_failure(&self) -> bool {
    matches!(self, AuthError::Repository(err) if err.is_connection_failure())
  }
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::Io(e) => RepositoryError::ConnectionFailed(e.to_string()),
      sqlx::Error::Tls(e) => RepositoryError::ConnectionFailed(e.to_string()),
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<redis::RedisError> for RepositoryError {
  fn from(error: redis::RedisError) -> Self {
    if error.is_io_error() || error.is_connection_refusal() || error.is_timeout() {
      RepositoryError::ConnectionFailed(error.to_string())
    } else {
      RepositoryError::SessionStore(error.to_string())
    }
  }
}

impl From<redis::RedisError> for AuthError {
  fn from(error: redis::RedisError) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
