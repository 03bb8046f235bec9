use std::sync::Arc;

use super::parse_session_token;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{ClientAddress, Password, UserId, Username};

/// Command for logging in a player
#[derive(Debug, Clone, Default)]
pub struct LoginUserCommand {
  /// Account name as typed
  pub username: String,
  /// Password (plain text)
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: UserId,
  /// Account name as stored
  pub username: String,
  /// Token to hand back to the client in the session cookie
  pub session_token: String,
}

/// Use case for logging in a player
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case
  ///
  /// # Arguments
  /// * `command` - The login command containing credentials
  /// * `client` - Address the request came from, used for throttling
  /// * `current_session` - Raw session cookie value, if the client sent one
  ///
  /// # Errors
  /// Returns `AuthError` if login fails (e.g., missing fields, invalid
  /// credentials, rate limit exceeded)
  pub async fn execute(
    &self,
    command: LoginUserCommand,
    client: ClientAddress,
    current_session: Option<String>,
  ) -> Result<LoginUserResponse, AuthError> {
    // Validate input before any store access
    let username = Username::new(&command.username)?;
    let password = Password::new(command.password)?;

    let previous = parse_session_token(current_session);

    let (identity, session_token) = self
      .auth_service
      .authenticate(username, password, &client, previous.as_ref())
      .await?;

    Ok(LoginUserResponse {
      user_id: identity.user_id,
      username: identity.username,
      session_token: session_token.into_inner(),
    })
  }
}
