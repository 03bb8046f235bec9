use std::sync::Arc;

use super::parse_session_token;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

/// Identity bound to the caller's session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCurrentUserResponse {
  pub user_id: UserId,
  pub username: String,
}

/// Use case for reading who is logged in
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Returns `None` for anonymous callers, including ones holding an
  /// expired or malformed session cookie.
  pub async fn execute(
    &self,
    session_token: Option<String>,
  ) -> Result<Option<GetCurrentUserResponse>, AuthError> {
    let token = parse_session_token(session_token);

    let identity = self.auth_service.current_user(token.as_ref()).await?;

    Ok(identity.map(|identity| GetCurrentUserResponse {
      user_id: identity.user_id,
      username: identity.username,
    }))
  }
}
