//! Authentication use cases
//!
//! This module contains all authentication-related use cases that orchestrate
//! domain services to implement application-specific workflows.

mod get_current_user;
mod login_user;
mod logout_user;
mod register_user;

pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};

use crate::domain::auth::value_objects::SessionToken;

/// A cookie value that is not a well-formed token cannot name a session, so it
/// is treated as no session at all.
pub(crate) fn parse_session_token(raw: Option<String>) -> Option<SessionToken> {
  raw.and_then(|value| SessionToken::from_string(value).ok())
}
