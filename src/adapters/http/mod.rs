pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod templates;

// Re-export commonly used types
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{
  AuthRouteDependencies, configure_auth_routes, configure_concept_api_routes,
  configure_concept_page_routes,
};
pub use session::WebSettings;
pub use templates::TemplateEngine;
