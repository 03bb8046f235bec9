use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use costa_web::{
  adapters::http::{
    AuthRouteDependencies, RequestIdMiddleware, TemplateEngine, WebSettings,
    configure_auth_routes, configure_concept_api_routes, configure_concept_page_routes,
    handlers::health_check,
  },
  application::auth::{
    GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
  },
  domain::auth::errors::RepositoryError,
  domain::auth::ports::SessionRepository,
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::concepts::ConceptCatalog,
  infrastructure::{
    clock::SystemClock,
    config::{Config, SessionBackend},
    persistence::{
      memory::{
        InMemoryAttemptCounterRepository, InMemorySessionRepository, spawn_counter_pruner,
        spawn_session_sweeper,
      },
      mysql::{CredentialSchema, MySqlUserRepository, create_pool},
      redis::RedisSessionRepository,
    },
    security::Sha1PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "costa_web=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Costa Roleplay web");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!(
    environment = %config.server.environment,
    "Configuration loaded successfully"
  );

  let schema = CredentialSchema::from_config(&config.credential_store).map_err(|e| {
    tracing::error!("Invalid credential store settings: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;

  // The pool is lazy; the layout check below is the first real connection
  tracing::info!("Using database: {:?}", config.database);
  let db_pool = create_pool(&config.database);

  match tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    schema.verify(&db_pool),
  )
  .await
  {
    Ok(Ok(())) => tracing::info!(table = %config.credential_store.table, "Account table verified"),
    Ok(Err(e @ RepositoryError::SchemaMismatch { .. })) => {
      tracing::error!("{}", e);
      return Err(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        e.to_string(),
      ));
    }
    Ok(Err(e)) => {
      tracing::warn!("Could not verify account table, continuing: {}", e);
    }
    Err(_) => {
      tracing::warn!(
        "Database did not answer within {} seconds. Is MySQL running? Continuing",
        config.database.connect_timeout_seconds
      );
    }
  }

  let clock = Arc::new(SystemClock);
  let idle_ttl = chrono::Duration::seconds(config.session.idle_ttl_seconds as i64);

  let session_repo: Arc<dyn SessionRepository> = match config.session.backend {
    SessionBackend::Memory => {
      let repo = Arc::new(InMemorySessionRepository::new(clock.clone(), idle_ttl));
      spawn_session_sweeper(
        repo.clone(),
        Duration::from_secs(config.session.sweep_interval_seconds),
      );
      tracing::info!("Sessions kept in process memory");
      repo
    }
    SessionBackend::Redis => {
      let url = config.session.redis_url.clone().unwrap_or_default();
      let redis_client = redis::Client::open(url).map_err(|e| {
        tracing::error!("Failed to create Redis client: {}", e);
        std::io::Error::new(
          std::io::ErrorKind::InvalidInput,
          format!("Invalid Redis URL: {}", e),
        )
      })?;

      let redis_conn = tokio::time::timeout(
        Duration::from_secs(config.database.connect_timeout_seconds),
        redis_client.get_connection_manager(),
      )
      .await
      .map_err(|_| {
        tracing::error!("Redis connection timed out. Is Redis running?");
        std::io::Error::new(std::io::ErrorKind::TimedOut, "Redis connection timed out")
      })?
      .map_err(|e| {
        tracing::error!("Failed to connect to Redis: {}", e);
        std::io::Error::new(
          std::io::ErrorKind::ConnectionRefused,
          format!("Could not connect to Redis: {}", e),
        )
      })?;

      tracing::info!("Sessions kept in Redis");
      Arc::new(RedisSessionRepository::new(
        redis_conn,
        config.session.idle_ttl_seconds,
      ))
    }
  };

  let attempt_repo = Arc::new(InMemoryAttemptCounterRepository::new(
    clock.clone(),
    chrono::Duration::seconds(config.rate_limit.login_window_seconds as i64),
  ));
  spawn_counter_pruner(
    attempt_repo.clone(),
    Duration::from_secs(config.rate_limit.prune_interval_seconds),
  );

  let user_repo = Arc::new(MySqlUserRepository::new(db_pool, &schema));

  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_repo,
    attempt_repo,
    Arc::new(Sha1PasswordHasher::new()),
    clock,
    AuthServiceConfig {
      max_failed_attempts: config.rate_limit.login_max_attempts,
      rate_limit_window_seconds: config.rate_limit.login_window_seconds as i64,
    },
  ));

  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service));

  let templates = TemplateEngine::new(&config.server.templates_dir).map_err(|e| {
    tracing::error!("Failed to initialize template engine: {}", e);
    std::io::Error::other(e.to_string())
  })?;
  tracing::info!("Template engine initialized");

  let catalog = ConceptCatalog::new();

  let settings = WebSettings {
    cookie_name: config.session.cookie_name.clone(),
    trust_proxy_headers: config.server.trust_proxy_headers,
    expose_diagnostics: !config.server.is_production(),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let static_dir = config.server.static_dir.clone();

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .route("/health", web::get().to(health_check))
      .service(web::scope("/api").configure(|cfg| {
        configure_auth_routes(
          cfg,
          AuthRouteDependencies {
            settings: settings.clone(),
            register_use_case: register_use_case.clone(),
            login_use_case: login_use_case.clone(),
            logout_use_case: logout_use_case.clone(),
            get_user_use_case: get_user_use_case.clone(),
          },
        );
        configure_concept_api_routes(cfg, catalog);
      }))
      .configure(|cfg| configure_concept_page_routes(cfg, catalog, templates.clone()))
      // Static site, registered last so it never shadows the routes above
      .service(fs::Files::new("/", &static_dir).index_file("index.html"))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
