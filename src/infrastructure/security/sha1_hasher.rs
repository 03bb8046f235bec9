use async_trait::async_trait;
use sha1::{Digest, Sha1};

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordDigest};

/// Unsalted SHA-1 password digests, lowercase hex.
///
/// This is the format the game server writes into its account table. It is
/// weak against offline attacks, but accounts created here must stay usable
/// in game, so the format cannot change on this side alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1PasswordHasher;

impl Sha1PasswordHasher {
  pub fn new() -> Self {
    Self
  }

  fn compute(password: &Password) -> PasswordDigest {
    let mut hasher = Sha1::new();
    hasher.update(password.as_str().as_bytes());
    PasswordDigest::from_stored(hex::encode(hasher.finalize()))
  }
}

#[async_trait]
impl PasswordHasher for Sha1PasswordHasher {
  async fn digest(&self, password: &Password) -> Result<PasswordDigest, AuthError> {
    Ok(Self::compute(password))
  }

  /// Compares in constant time against the stored digest
  async fn verify(&self, password: &Password, stored: &PasswordDigest) -> Result<bool, AuthError> {
    Ok(Self::compute(password).matches(stored))
  }
}
