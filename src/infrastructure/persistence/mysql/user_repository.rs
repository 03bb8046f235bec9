use async_trait::async_trait;
use sqlx::MySqlPool;

use super::schema::CredentialSchema;
use crate::domain::auth::{
  entities::{NewUser, User},
  errors::AuthError,
  ports::UserRepository,
  value_objects::{UserId, Username},
};
use crate::infrastructure::config::RegistrationValue;

/// MySQL implementation of the UserRepository trait over the game server's
/// account table
pub struct MySqlUserRepository {
  pool: MySqlPool,
  find_sql: String,
  exists_sql: String,
  insert_sql: String,
  email_insertable: bool,
}

/// Database row structure, with columns aliased to these names
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: i64,
  username: String,
  password_digest: String,
  email: Option<String>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(row.id, row.username, row.password_digest, row.email)
  }
}

fn quote(identifier: &str) -> String {
  format!("`{}`", identifier)
}

impl MySqlUserRepository {
  /// Creates a new instance of MySqlUserRepository
  pub fn new(pool: MySqlPool, schema: &CredentialSchema) -> Self {
    let table = quote(&schema.table);
    let id = quote(&schema.id_column);
    let username = quote(&schema.username_column);
    let password = quote(&schema.password_column);

    let email_select = match &schema.email_column {
      Some(column) => format!("CAST({} AS CHAR)", quote(column)),
      None => "CAST(NULL AS CHAR)".to_string(),
    };

    // The binary comparison keeps case-insensitive collations from matching
    // `Alice` for `alice`; the plain one still lets the index do the work.
    let find_sql = format!(
      "SELECT CAST({id} AS SIGNED) AS id, CAST({username} AS CHAR) AS username, \
       CAST({password} AS CHAR) AS password_digest, {email_select} AS email \
       FROM {table} WHERE {username} = ? AND CAST({username} AS BINARY) = CAST(? AS BINARY) LIMIT 1"
    );

    let exists_sql = format!("SELECT 1 FROM {table} WHERE {username} = ? LIMIT 1");

    let mut columns = vec![username.clone(), password.clone()];
    let mut values = vec!["?", "?"];
    if let Some(column) = &schema.email_column {
      columns.push(quote(column));
      values.push("?");
    }
    if let Some(column) = &schema.registration_column {
      columns.push(quote(column));
      values.push(match schema.registration_value {
        RegistrationValue::Now => "NOW()",
        RegistrationValue::UnixTimestamp => "UNIX_TIMESTAMP()",
      });
    }
    let insert_sql = format!(
      "INSERT INTO {table} ({}) VALUES ({})",
      columns.join(", "),
      values.join(", ")
    );

    Self {
      pool,
      find_sql,
      exists_sql,
      insert_sql,
      email_insertable: schema.email_column.is_some(),
    }
  }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(&self.find_sql)
      .bind(username.as_str())
      .bind(username.as_str())
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(User::from))
  }

  async fn exists(&self, username: &Username) -> Result<bool, AuthError> {
    let row = sqlx::query(&self.exists_sql)
      .bind(username.as_str())
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.is_some())
  }

  async fn create(&self, user: NewUser) -> Result<UserId, AuthError> {
    let mut query = sqlx::query(&self.insert_sql)
      .bind(user.username.as_str())
      .bind(user.password_digest.as_str());

    if self.email_insertable {
      query = query.bind(user.email.as_ref().map(|email| email.as_str()));
    }

    let result = query.execute(&self.pool).await.map_err(|e| {
      tracing::error!(error = %e, "Failed to insert account");
      AuthError::from(e)
    })?;

    Ok(UserId::new(result.last_insert_id() as i64))
  }
}
