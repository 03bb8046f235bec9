use actix_web::{HttpResponse, error::ResponseError, http::StatusCode};
use std::fmt;

use crate::domain::auth::errors::AuthError;

use super::dtos::{ErrorResponse, JSON_UTF8};

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Missing or malformed input (400 Bad Request)
  Validation(ValidationKind),

  /// Authentication outcome (401, 409 or 429)
  Auth(AuthErrorKind),

  /// Wrong HTTP method for the endpoint (405)
  MethodNotAllowed,

  /// Unknown resource (404)
  NotFound,

  /// Request body over the configured limit (413)
  PayloadTooLarge,

  /// Storage or internal failure (500 Internal Server Error)
  Storage {
    kind: StorageErrorKind,
    detail: String,
    expose: bool,
  },
}

/// Input problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
  MissingCredentials,
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// Unknown user or wrong password, indistinguishable (401)
  InvalidCredentials,

  /// Too many failed logins from this address (429)
  RateLimitExceeded,

  /// Registration with a taken name (409)
  UsernameAlreadyExists,
}

/// What kind of 500 the caller sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
  /// The credential database could not be reached
  Connection,
  /// The account insert failed, usually a table layout problem
  Registration,
  Internal,
}

impl ApiError {
  pub fn internal(detail: impl Into<String>) -> Self {
    ApiError::Storage {
      kind: StorageErrorKind::Internal,
      detail: detail.into(),
      expose: false,
    }
  }

  /// Maps an error from the registration flow, where a failed insert gets
  /// its own message pointing at the account table.
  pub fn from_registration(error: AuthError) -> Self {
    match ApiError::from(error) {
      ApiError::Storage {
        kind: StorageErrorKind::Internal,
        detail,
        expose,
      } => ApiError::Storage {
        kind: StorageErrorKind::Registration,
        detail,
        expose,
      },
      other => other,
    }
  }

  /// Allows internal detail into the response body. Only for non-production
  /// deployments.
  pub fn with_diagnostics(self, expose: bool) -> Self {
    match self {
      ApiError::Storage { kind, detail, .. } => ApiError::Storage {
        kind,
        detail,
        expose,
      },
      other => other,
    }
  }

  /// Message shown to the player
  pub fn message(&self) -> &'static str {
    match self {
      ApiError::Validation(ValidationKind::MissingCredentials) => "Usuario y contraseña requeridos",
      ApiError::Auth(AuthErrorKind::InvalidCredentials) => "Credenciales inválidas",
      ApiError::Auth(AuthErrorKind::RateLimitExceeded) => {
        "Demasiados intentos. Intenta de nuevo más tarde."
      }
      ApiError::Auth(AuthErrorKind::UsernameAlreadyExists) => "Usuario ya existe",
      ApiError::MethodNotAllowed => "Method not allowed",
      ApiError::NotFound => "No encontrado",
      ApiError::PayloadTooLarge => "Petición demasiado grande",
      ApiError::Storage { kind, .. } => match kind {
        StorageErrorKind::Connection => "DB connection error",
        StorageErrorKind::Registration => {
          "Error al crear usuario en la tabla MTA. Comprueba la estructura de `wcf1_user`."
        }
        StorageErrorKind::Internal => "Error interno del servidor",
      },
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(kind) => write!(f, "Validation error: {:?}", kind),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
      ApiError::NotFound => write!(f, "Not found"),
      ApiError::PayloadTooLarge => write!(f, "Payload too large"),
      ApiError::Storage { kind, detail, .. } => write!(f, "Storage error ({:?}): {}", kind, detail),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        AuthErrorKind::UsernameAlreadyExists => StatusCode::CONFLICT,
      },
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let debug = match self {
      ApiError::Storage { detail, expose, .. } => {
        tracing::error!(error = %detail, "Request failed");
        expose.then(|| detail.clone())
      }
      _ => None,
    };

    let body = ErrorResponse {
      success: false,
      message: self.message().to_string(),
      debug,
    };

    HttpResponse::build(self.status_code())
      .content_type(JSON_UTF8)
      .json(body)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::RateLimitExceeded => ApiError::Auth(AuthErrorKind::RateLimitExceeded),
      AuthError::UsernameAlreadyExists => ApiError::Auth(AuthErrorKind::UsernameAlreadyExists),
      AuthError::Validation(_) => ApiError::Validation(ValidationKind::MissingCredentials),
      AuthError::Repository(err) => {
        let kind = if err.is_connection_failure() {
          StorageErrorKind::Connection
        } else {
          StorageErrorKind::Internal
        };
        ApiError::Storage {
          kind,
          detail: err.to_string(),
          expose: false,
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
  use crate::domain::auth::value_objects::ValueObjectError;
  use actix_web::body::to_bytes;

  async fn body_json(error: ApiError) -> serde_json::Value {
    let response = error.error_response();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation(ValidationKind::MissingCredentials).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::RateLimitExceeded).status_code(),
      StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::UsernameAlreadyExists).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::MethodNotAllowed.status_code(),
      StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(
      ApiError::PayloadTooLarge.status_code(),
      StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
      ApiError::internal("boom").status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_mapping() {
    assert!(matches!(
      ApiError::from(AuthError::Validation(ValueObjectError::EmptyUsername)),
      ApiError::Validation(ValidationKind::MissingCredentials)
    ));
    assert!(matches!(
      ApiError::from(AuthError::Validation(ValueObjectError::EmptyPassword)),
      ApiError::Validation(ValidationKind::MissingCredentials)
    ));
    assert!(matches!(
      ApiError::from(AuthError::from(RepositoryError::ConnectionFailed("down".into()))),
      ApiError::Storage {
        kind: StorageErrorKind::Connection,
        ..
      }
    ));
  }

  #[test]
  fn test_registration_storage_message() {
    let error = ApiError::from_registration(AuthError::from(RepositoryError::DatabaseError(
      "Field 'salt' doesn't have a default value".into(),
    )));
    assert_eq!(
      error.message(),
      "Error al crear usuario en la tabla MTA. Comprueba la estructura de `wcf1_user`."
    );

    // Connection failures keep their own message
    let error = ApiError::from_registration(AuthError::from(RepositoryError::ConnectionFailed(
      "refused".into(),
    )));
    assert_eq!(error.message(), "DB connection error");
  }

  #[actix_web::test]
  async fn test_debug_detail_only_when_exposed() {
    let hidden = body_json(ApiError::internal("secret detail")).await;
    assert_eq!(
      hidden,
      serde_json::json!({"success": false, "message": "Error interno del servidor"})
    );

    let shown = body_json(ApiError::internal("secret detail").with_diagnostics(true)).await;
    assert_eq!(shown["debug"], "secret detail");
  }

  #[actix_web::test]
  async fn test_error_response_content_type() {
    let response = ApiError::Auth(AuthErrorKind::InvalidCredentials).error_response();
    assert_eq!(
      response.headers().get("content-type").unwrap(),
      "application/json; charset=utf-8"
    );

    let body = body_json(ApiError::Auth(AuthErrorKind::InvalidCredentials)).await;
    assert_eq!(
      body,
      serde_json::json!({"success": false, "message": "Credenciales inválidas"})
    );
  }
}
