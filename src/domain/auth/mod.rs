pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{AttemptCounter, Identity, NewUser, Session, User};
pub use errors::{AuthError, RepositoryError};
pub use services::{AuthService, AuthServiceConfig};
pub use value_objects::{
  ClientAddress, Email, Password, PasswordDigest, SessionToken, TokenHash, UserId, Username,
  ValueObjectError,
};
