use std::sync::Arc;

use super::parse_session_token;
use crate::domain::auth::services::AuthService;

/// Use case for logging out a player
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  /// Creates a new instance of LogoutUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Destroys the caller's session.
  ///
  /// Logout never fails from the caller's point of view: a session store
  /// error is logged and the client cookie is cleared regardless.
  pub async fn execute(&self, session_token: Option<String>) {
    let token = parse_session_token(session_token);

    if let Err(e) = self.auth_service.logout(token.as_ref()).await {
      tracing::error!(error = %e, "Failed to delete session on logout");
    }
  }
}
