use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::domain::concepts::ConceptCatalog;

use super::handlers::auth::{
  get_current_user_handler, login_handler, logout_handler, method_not_allowed, register_handler,
};
use super::handlers::concepts::{
  concept_page_handler, get_concept_handler, list_concepts_handler,
};
use super::session::WebSettings;
use super::templates::TemplateEngine;

/// Largest login or registration body accepted
pub const MAX_AUTH_BODY_BYTES: usize = 16 * 1024;

/// Everything the account endpoints need
pub struct AuthRouteDependencies {
  pub settings: WebSettings,
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
}

/// Configure account routes
///
/// Mounts the account endpoints under the provided scope (e.g. `/api`).
///
/// # Routes
///
/// - ANY /get_user - Who is logged in
/// - POST /login - Check credentials and open a session
/// - ANY /logout - Destroy the session
/// - POST /register - Create an account
///
/// Other methods on `/login` and `/register` answer 405. Bodies over
/// `MAX_AUTH_BODY_BYTES` answer 413 with the usual JSON error body.
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: AuthRouteDependencies) {
  cfg
    .app_data(web::PayloadConfig::new(MAX_AUTH_BODY_BYTES))
    .app_data(web::Data::new(deps.settings))
    .app_data(web::Data::new(deps.register_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .app_data(web::Data::new(deps.logout_use_case))
    .app_data(web::Data::new(deps.get_user_use_case))
    .service(web::resource("/get_user").to(get_current_user_handler))
    .service(
      web::resource("/login")
        .route(web::post().to(login_handler))
        .default_service(web::to(method_not_allowed)),
    )
    .service(web::resource("/logout").to(logout_handler))
    .service(
      web::resource("/register")
        .route(web::post().to(register_handler))
        .default_service(web::to(method_not_allowed)),
    );
}

/// Configure the JSON rules reference
///
/// - GET /concepts
/// - GET /concepts/{slug}
pub fn configure_concept_api_routes(cfg: &mut web::ServiceConfig, catalog: ConceptCatalog) {
  cfg
    .app_data(web::Data::new(catalog))
    .route("/concepts", web::get().to(list_concepts_handler))
    .route("/concepts/{slug}", web::get().to(get_concept_handler));
}

/// Configure the server-rendered rules reference
///
/// - GET /conceptos/{slug}
pub fn configure_concept_page_routes(
  cfg: &mut web::ServiceConfig,
  catalog: ConceptCatalog,
  templates: TemplateEngine,
) {
  cfg
    .app_data(web::Data::new(catalog))
    .app_data(web::Data::new(templates))
    .route("/conceptos/{slug}", web::get().to(concept_page_handler));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::ports::AttemptCounterRepository;
  use crate::domain::auth::value_objects::ClientAddress;
  use crate::testing::TestHarness;
  use actix_web::{
    App,
    cookie::Cookie,
    dev::ServiceResponse,
    http::{StatusCode, header},
    test::{self, TestRequest},
  };

  const PEER: &str = "1.2.3.4:40000";

  fn deps(harness: &TestHarness, expose_diagnostics: bool) -> AuthRouteDependencies {
    AuthRouteDependencies {
      settings: WebSettings {
        cookie_name: "COSTASESSID".to_string(),
        trust_proxy_headers: false,
        expose_diagnostics,
      },
      register_use_case: Arc::new(RegisterUserUseCase::new(harness.service.clone())),
      login_use_case: Arc::new(LoginUserUseCase::new(harness.service.clone())),
      logout_use_case: Arc::new(LogoutUserUseCase::new(harness.service.clone())),
      get_user_use_case: Arc::new(GetCurrentUserUseCase::new(harness.service.clone())),
    }
  }

  macro_rules! app {
    ($harness:expr, $expose:expr) => {{
      let deps = deps(&$harness, $expose);
      test::init_service(App::new().service(web::scope("/api").configure(move |cfg| {
        configure_auth_routes(cfg, deps);
        configure_concept_api_routes(cfg, ConceptCatalog::new());
      })))
      .await
    }};
  }

  fn form_post(uri: &str, body: &'static str) -> TestRequest {
    TestRequest::post()
      .uri(uri)
      .peer_addr(PEER.parse().unwrap())
      .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
      .set_payload(body)
  }

  fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp
      .response()
      .cookies()
      .find(|c| c.name() == "COSTASESSID")
      .map(|c| c.into_owned())
  }

  #[actix_web::test]
  async fn test_unknown_user_gets_401_and_counts() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    let resp = test::call_service(
      &app,
      form_post("/api/login", "user=alice&pass=secret123").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/json; charset=utf-8"
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
      body,
      serde_json::json!({"success": false, "message": "Credenciales inválidas"})
    );

    let counter = harness
      .attempts
      .get(&ClientAddress::new("1.2.3.4"))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(counter.count, 1);
  }

  #[actix_web::test]
  async fn test_unknown_user_and_wrong_password_are_identical() {
    let harness = TestHarness::new();
    harness.users.insert_plain(1, "alice", "secret123");
    let app = app!(harness, true);

    let unknown = test::call_service(
      &app,
      form_post("/api/login", "user=nobody&pass=secret123").to_request(),
    )
    .await;
    let unknown_status = unknown.status();
    let unknown_body = test::read_body(unknown).await;

    let wrong = test::call_service(
      &app,
      form_post("/api/login", "user=alice&pass=wrong").to_request(),
    )
    .await;
    let wrong_status = wrong.status();
    let wrong_body = test::read_body(wrong).await;

    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
  }

  #[actix_web::test]
  async fn test_seventh_attempt_is_rate_limited() {
    let harness = TestHarness::new();
    harness.users.insert_plain(1, "alice", "secret123");
    let app = app!(harness, false);

    for _ in 0..6 {
      let resp = test::call_service(
        &app,
        form_post("/api/login", "user=alice&pass=wrong").to_request(),
      )
      .await;
      assert!(resp.status().is_client_error());
    }

    let resp = test::call_service(
      &app,
      form_post("/api/login", "user=alice&pass=secret123").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
      body["message"],
      "Demasiados intentos. Intenta de nuevo más tarde."
    );
  }

  #[actix_web::test]
  async fn test_login_session_roundtrip() {
    let harness = TestHarness::new();
    harness.users.insert_plain(1, "alice", "secret123");
    let app = app!(harness, false);

    let resp = test::call_service(
      &app,
      TestRequest::post()
        .uri("/api/login")
        .peer_addr(PEER.parse().unwrap())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"user":"alice","pass":"secret123"}"#)
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = session_cookie(&resp).expect("session cookie missing");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), None);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"success": true, "user": "alice"}));

    let resp = test::call_service(
      &app,
      TestRequest::get()
        .uri("/api/get_user")
        .cookie(cookie.clone())
        .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"logged": true, "user": "alice"}));

    let resp = test::call_service(
      &app,
      TestRequest::post()
        .uri("/api/logout")
        .cookie(cookie.clone())
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let removal = session_cookie(&resp).expect("removal cookie missing");
    assert_eq!(removal.value(), "");
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"success": true}));

    let resp = test::call_service(
      &app,
      TestRequest::get()
        .uri("/api/get_user")
        .cookie(cookie)
        .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"logged": false}));
  }

  #[actix_web::test]
  async fn test_logout_without_session_succeeds() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    let resp = test::call_service(
      &app,
      TestRequest::get().uri("/api/logout").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[actix_web::test]
  async fn test_wrong_method_is_405() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    for uri in ["/api/login", "/api/register"] {
      let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
      assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
      let body: serde_json::Value = test::read_body_json(resp).await;
      assert_eq!(
        body,
        serde_json::json!({"success": false, "message": "Method not allowed"})
      );
    }
  }

  #[actix_web::test]
  async fn test_missing_fields_are_400() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    for uri in ["/api/login", "/api/register"] {
      let resp = test::call_service(&app, form_post(uri, "user=alice").to_request()).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
      let body: serde_json::Value = test::read_body_json(resp).await;
      assert_eq!(body["message"], "Usuario y contraseña requeridos");
    }

    let resp = test::call_service(
      &app,
      TestRequest::post()
        .uri("/api/login")
        .set_payload("not json at all")
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn test_register_then_login() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    let resp = test::call_service(
      &app,
      form_post("/api/register", "user=bob&pass=hunter22&email=").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_none());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"success": true, "user": "bob"}));

    let resp = test::call_service(
      &app,
      form_post("/api/register", "user=bob&pass=other").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Usuario ya existe");

    let resp = test::call_service(
      &app,
      form_post("/api/login", "user=bob&pass=hunter22").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[actix_web::test]
  async fn test_database_down_is_500_with_debug_outside_production() {
    let harness = TestHarness::new();
    harness.users.fail_with_connection_error();

    let app = app!(harness, true);
    let resp = test::call_service(
      &app,
      form_post("/api/login", "user=alice&pass=secret123").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "DB connection error");
    assert!(body["debug"].is_string());

    let app = app!(harness, false);
    let resp = test::call_service(
      &app,
      form_post("/api/register", "user=alice&pass=secret123").to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
      body,
      serde_json::json!({"success": false, "message": "DB connection error"})
    );
  }

  #[actix_web::test]
  async fn test_oversized_body_is_json_413() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    let body = format!("user=alice&pass={}", "x".repeat(MAX_AUTH_BODY_BYTES));
    for uri in ["/api/login", "/api/register"] {
      let resp = test::call_service(
        &app,
        TestRequest::post()
          .uri(uri)
          .peer_addr(PEER.parse().unwrap())
          .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
          .set_payload(body.clone())
          .to_request(),
      )
      .await;

      assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
      assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=utf-8"
      );
      let body: serde_json::Value = test::read_body_json(resp).await;
      assert_eq!(
        body,
        serde_json::json!({"success": false, "message": "Petición demasiado grande"})
      );
    }

    assert_eq!(harness.users.lookups(), 0);
  }

  #[actix_web::test]
  async fn test_concept_api() {
    let harness = TestHarness::new();
    let app = app!(harness, false);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/concepts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[1]["slug"], "ic-ooc");

    let resp = test::call_service(
      &app,
      TestRequest::get().uri("/api/concepts/entornos").to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Entornos en Rol");
    assert!(!body["sections"].as_array().unwrap().is_empty());

    let resp = test::call_service(
      &app,
      TestRequest::get().uri("/api/concepts/nope").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
