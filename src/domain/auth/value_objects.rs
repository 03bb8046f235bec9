use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Username is required")]
  EmptyUsername,

  #[error("Password is required")]
  EmptyPassword,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Username Value Object
// ============================================================================

/// Account name as stored in the game server's user table.
///
/// Surrounding whitespace is trimmed; case is preserved because lookups are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  pub fn new(username: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    let trimmed = username.as_ref().trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::EmptyUsername);
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Username {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password as typed by the player. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  /// Creates a new Password. Only emptiness is checked: the game server owns
  /// the password policy and existing accounts must keep working.
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::EmptyPassword);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordDigest Value Object (stored credential)
// ============================================================================

/// Password credential exactly as the credential store holds it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
  pub fn from_stored(digest: impl Into<String>) -> Self {
    Self(digest.into())
  }

  /// Compares two digests without short-circuiting on the first differing byte.
  pub fn matches(&self, other: &PasswordDigest) -> bool {
    constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordDigest(***)")
  }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  let mut diff = 0u8;
  for (x, y) in a.iter().zip(b.iter()) {
    diff |= x ^ y;
  }
  diff == 0
}

// ============================================================================
// Email Value Object
// ============================================================================

/// Contact address stored as the player typed it, minus surrounding
/// whitespace. The account table does not require a well-formed address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  pub fn new(email: impl AsRef<str>) -> Self {
    Self(email.as_ref().trim().to_string())
  }

  /// Registration treats a blank email field the same as a missing one.
  pub fn parse_optional(email: Option<String>) -> Option<Self> {
    email
      .filter(|value| !value.trim().is_empty())
      .map(Self::new)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token
  pub fn generate() -> Self {
    use rand::Rng;

    let token: [u8; Self::TOKEN_LENGTH] = rand::rngs::OsRng.sample(rand::distributions::Standard);

    Self(hex::encode(token))
  }

  /// Creates a SessionToken from an existing token string (e.g. a cookie value)
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::TOKEN_LENGTH * 2 {
      return Err(ValueObjectError::InvalidToken);
    }

    if !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// Creates a hash of this token for storage
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());

    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

impl fmt::Display for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

/// Session store key. The raw token only ever lives in the client's cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// UserId Value Object
// ============================================================================

/// Integer primary key of the game server's user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
  pub fn new(id: i64) -> Self {
    Self(id)
  }

  pub fn value(&self) -> i64 {
    self.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<i64> for UserId {
  fn from(id: i64) -> Self {
    Self(id)
  }
}

// ============================================================================
// ClientAddress Value Object
// ============================================================================

/// Opaque throttling key for the requesting client, usually its IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientAddress(String);

impl ClientAddress {
  const UNKNOWN: &'static str = "unknown";

  pub fn new(address: impl AsRef<str>) -> Self {
    let address = address.as_ref().trim();
    if address.is_empty() {
      return Self::unknown();
    }
    Self(address.to_string())
  }

  pub fn unknown() -> Self {
    Self(Self::UNKNOWN.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ClientAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
