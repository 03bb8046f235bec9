pub mod schema;
pub mod user_repository;

pub use schema::CredentialSchema;
pub use user_repository::MySqlUserRepository;

use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::time::Duration;

use crate::infrastructure::config::DatabaseConfig;

/// Builds the credential store pool without opening a connection.
///
/// Connections are established on first use, so an unreachable database
/// surfaces as a per-request error instead of stopping the server.
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
  let options = MySqlConnectOptions::new()
    .host(&config.host)
    .port(config.port)
    .username(&config.user)
    .password(&config.password)
    .database(&config.name)
    .charset(&config.charset);

  MySqlPoolOptions::new()
    .max_connections(config.max_connections)
    .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
    .connect_lazy_with(options)
}
