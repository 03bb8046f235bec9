use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

// Default functions
fn default_environment() -> String {
  "development".to_string()
}

fn default_static_dir() -> String {
  "public".to_string()
}

fn default_templates_dir() -> String {
  "templates".to_string()
}

fn default_db_port() -> u16 {
  3306
}

fn default_charset() -> String {
  "utf8mb4".to_string()
}

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_cookie_name() -> String {
  "COSTASESSID".to_string()
}

fn default_idle_ttl() -> u64 {
  1440
}

fn default_sweep_interval() -> u64 {
  60
}

fn default_prune_interval() -> u64 {
  60
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub credential_store: CredentialStoreConfig,
  pub session: SessionConfig,
  pub rate_limit: RateLimitConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// `production` hides error diagnostics from responses
  #[serde(default = "default_environment")]
  pub environment: String,
  /// Take the client address from `Forwarded`/`X-Forwarded-For`
  #[serde(default)]
  pub trust_proxy_headers: bool,
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
  #[serde(default = "default_templates_dir")]
  pub templates_dir: String,
}

impl ServerConfig {
  pub fn is_production(&self) -> bool {
    self.environment.eq_ignore_ascii_case("production")
  }
}

/// Connection settings for the game server's MySQL/MariaDB database
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
  pub host: String,
  #[serde(default = "default_db_port")]
  pub port: u16,
  pub name: String,
  pub user: String,
  #[serde(default)]
  pub password: String,
  #[serde(default = "default_charset")]
  pub charset: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

impl fmt::Debug for DatabaseConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DatabaseConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("name", &self.name)
      .field("user", &self.user)
      .field("password", &"***")
      .field("charset", &self.charset)
      .field("max_connections", &self.max_connections)
      .field("connect_timeout_seconds", &self.connect_timeout_seconds)
      .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
      .finish()
  }
}

/// How the registration column is filled on insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationValue {
  /// `NOW()`, for DATETIME/TIMESTAMP columns
  #[default]
  Now,
  /// `UNIX_TIMESTAMP()`, for integer columns
  UnixTimestamp,
}

/// Layout of the externally owned account table
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialStoreConfig {
  pub table: String,
  pub id_column: String,
  pub username_column: String,
  pub password_column: String,
  #[serde(default)]
  pub email_column: Option<String>,
  #[serde(default)]
  pub registration_column: Option<String>,
  #[serde(default)]
  pub registration_value: RegistrationValue,
}

/// Where session state lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
  #[default]
  Memory,
  Redis,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
  #[serde(default)]
  pub backend: SessionBackend,
  #[serde(default = "default_cookie_name")]
  pub cookie_name: String,
  /// Sessions unused for this long are discarded
  #[serde(default = "default_idle_ttl")]
  pub idle_ttl_seconds: u64,
  /// How often the in-memory store drops idle sessions
  #[serde(default = "default_sweep_interval")]
  pub sweep_interval_seconds: u64,
  /// Required when `backend = "redis"`
  #[serde(default)]
  pub redis_url: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  pub login_max_attempts: u32,
  pub login_window_seconds: u64,
  /// How often counters whose window has run out are dropped
  #[serde(default = "default_prune_interval")]
  pub prune_interval_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with COSTA_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the COSTA_ prefix and are separated by double underscores:
  /// - `COSTA_SERVER__PORT=8080`
  /// - `COSTA_SERVER__ENVIRONMENT=production`
  /// - `COSTA_DATABASE__HOST=127.0.0.1`
  /// - `COSTA_DATABASE__PASSWORD=...`
  /// - `COSTA_SESSION__BACKEND=redis`
  /// - `COSTA_SESSION__REDIS_URL=redis://localhost`
  /// - `COSTA_RATE_LIMIT__LOGIN_MAX_ATTEMPTS=5`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if the default file is missing, a file contains
  /// invalid TOML, or a required value is missing or has the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Use double underscore as separator: COSTA_SERVER__PORT=8080
      .add_source(
        Environment::with_prefix("COSTA")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Config = config.try_deserialize()?;
    config.validate()?;

    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.session.backend == SessionBackend::Redis && self.session.redis_url.is_none() {
      return Err(ConfigError::Message(
        "session.redis_url is required when session.backend = \"redis\"".to_string(),
      ));
    }

    if self.session.cookie_name.trim().is_empty() {
      return Err(ConfigError::Message(
        "session.cookie_name must not be empty".to_string(),
      ));
    }

    Ok(())
  }
}
