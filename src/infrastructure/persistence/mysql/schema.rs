use sqlx::MySqlPool;

use crate::domain::auth::errors::RepositoryError;
use crate::infrastructure::config::{CredentialStoreConfig, RegistrationValue};

const MAX_IDENTIFIER_LEN: usize = 64;

/// Column layout of the account table, checked once and then trusted.
///
/// Identifiers come from configuration and end up inside SQL text, so only
/// plain `[A-Za-z0-9_]` names are accepted.
#[derive(Debug, Clone)]
pub struct CredentialSchema {
  pub table: String,
  pub id_column: String,
  pub username_column: String,
  pub password_column: String,
  pub email_column: Option<String>,
  pub registration_column: Option<String>,
  pub registration_value: RegistrationValue,
}

fn validate_identifier(name: &str) -> Result<String, RepositoryError> {
  let valid = !name.is_empty()
    && name.len() <= MAX_IDENTIFIER_LEN
    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

  if !valid {
    return Err(RepositoryError::InvalidIdentifier(name.to_string()));
  }

  Ok(name.to_string())
}

fn validate_optional(name: &Option<String>) -> Result<Option<String>, RepositoryError> {
  match name.as_deref().map(str::trim) {
    Some("") | None => Ok(None),
    Some(name) => validate_identifier(name).map(Some),
  }
}

impl CredentialSchema {
  pub fn from_config(config: &CredentialStoreConfig) -> Result<Self, RepositoryError> {
    Ok(Self {
      table: validate_identifier(&config.table)?,
      id_column: validate_identifier(&config.id_column)?,
      username_column: validate_identifier(&config.username_column)?,
      password_column: validate_identifier(&config.password_column)?,
      email_column: validate_optional(&config.email_column)?,
      registration_column: validate_optional(&config.registration_column)?,
      registration_value: config.registration_value,
    })
  }

  /// Every column the repository reads or writes
  pub fn columns(&self) -> Vec<&str> {
    let mut columns = vec![
      self.id_column.as_str(),
      self.username_column.as_str(),
      self.password_column.as_str(),
    ];
    columns.extend(self.email_column.as_deref());
    columns.extend(self.registration_column.as_deref());
    columns
  }

  /// Compares the declared layout with `information_schema`.
  ///
  /// # Errors
  /// * `RepositoryError::SchemaMismatch` - the table or some columns are missing
  /// * `RepositoryError::ConnectionFailed` - the database could not be reached
  pub async fn verify(&self, pool: &MySqlPool) -> Result<(), RepositoryError> {
    let present: Vec<String> = sqlx::query_scalar(
      r#"
            SELECT CAST(COLUMN_NAME AS CHAR)
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
            "#,
    )
    .bind(&self.table)
    .fetch_all(pool)
    .await?;

    let missing = self.missing_columns(&present);
    if !missing.is_empty() {
      return Err(RepositoryError::SchemaMismatch {
        table: self.table.clone(),
        missing,
      });
    }

    tracing::debug!(table = %self.table, "Credential store schema verified");

    Ok(())
  }

  fn missing_columns(&self, present: &[String]) -> Vec<String> {
    self
      .columns()
      .into_iter()
      .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
      .map(str::to_string)
      .collect()
  }
}
