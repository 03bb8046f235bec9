use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, UserId, Username};

/// Command for registering a new account
#[derive(Debug, Clone, Default)]
pub struct RegisterUserCommand {
  /// Requested account name
  pub username: String,
  /// Password (plain text, digested before storage)
  pub password: String,
  /// Optional contact email
  pub email: Option<String>,
}

/// Response after successful registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: UserId,
  pub username: String,
}

/// Use case for registering a new account
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g., name taken, validation errors)
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let username = Username::new(&command.username)?;
    let password = Password::new(command.password)?;
    let email = Email::parse_optional(command.email);

    let identity = self
      .auth_service
      .register(username, password, email)
      .await?;

    Ok(RegisterUserResponse {
      user_id: identity.user_id,
      username: identity.username,
    })
  }
}
