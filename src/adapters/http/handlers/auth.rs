use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;

use crate::adapters::http::{
  dtos::{
    AuthSuccessResponse, CurrentUserResponse, JSON_UTF8, LoginRequest, RegisterRequest,
    RequestFields, SuccessResponse,
  },
  errors::ApiError,
  session::WebSettings,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, LogoutUserUseCase,
  RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for reading the logged-in player
///
/// ANY /api/get_user
/// Response: `{logged:true,user}` or `{logged:false}`
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  settings: web::Data<WebSettings>,
  http_req: HttpRequest,
) -> HttpResponse {
  let response = match use_case.execute(settings.session_token(&http_req)).await {
    Ok(Some(user)) => CurrentUserResponse::logged_in(user.username),
    Ok(None) => CurrentUserResponse::anonymous(),
    Err(e) => {
      tracing::error!(error = %e, "Failed to read session, answering as anonymous");
      CurrentUserResponse::anonymous()
    }
  };

  HttpResponse::Ok().content_type(JSON_UTF8).json(response)
}

/// Handler for login
///
/// POST /api/login
/// Body: form or JSON with `user` and `pass`
/// Response: `{success:true,user}` and a fresh session cookie
pub async fn login_handler(
  body: Result<web::Bytes, actix_web::Error>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  settings: web::Data<WebSettings>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let body = request_body(body)?;
  let request = LoginRequest::from(RequestFields::parse(&http_req, &body));

  let command = LoginUserCommand {
    username: request.user,
    password: request.pass,
  };

  let response = use_case
    .execute(
      command,
      settings.client_address(&http_req),
      settings.session_token(&http_req),
    )
    .await
    .map_err(|e| ApiError::from(e).with_diagnostics(settings.expose_diagnostics))?;

  Ok(
    HttpResponse::Ok()
      .content_type(JSON_UTF8)
      .cookie(settings.session_cookie(&http_req, response.session_token))
      .json(AuthSuccessResponse::new(response.username)),
  )
}

/// Handler for logout
///
/// ANY /api/logout
/// Response: `{success:true}`, always, with the session cookie cleared
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  settings: web::Data<WebSettings>,
  http_req: HttpRequest,
) -> HttpResponse {
  use_case.execute(settings.session_token(&http_req)).await;

  HttpResponse::Ok()
    .content_type(JSON_UTF8)
    .cookie(settings.removal_cookie(&http_req))
    .json(SuccessResponse::ok())
}

/// Handler for registration
///
/// POST /api/register
/// Body: form or JSON with `user`, `pass` and optional `email`
/// Response: `{success:true,user}`; no session is opened
pub async fn register_handler(
  body: Result<web::Bytes, actix_web::Error>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
  settings: web::Data<WebSettings>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let body = request_body(body)?;
  let request = RegisterRequest::from(RequestFields::parse(&http_req, &body));

  let command = RegisterUserCommand {
    username: request.user,
    password: request.pass,
    email: request.email,
  };

  let response = use_case
    .execute(command)
    .await
    .map_err(|e| ApiError::from_registration(e).with_diagnostics(settings.expose_diagnostics))?;

  Ok(
    HttpResponse::Ok()
      .content_type(JSON_UTF8)
      .json(AuthSuccessResponse::new(response.username)),
  )
}

/// Oversized bodies are rejected; any other read failure counts as empty
/// input and ends in the missing-credentials answer.
fn request_body(body: Result<web::Bytes, actix_web::Error>) -> Result<web::Bytes, ApiError> {
  match body {
    Ok(bytes) => Ok(bytes),
    Err(e) if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE => {
      Err(ApiError::PayloadTooLarge)
    }
    Err(e) => {
      tracing::debug!(error = %e, "Unreadable request body");
      Ok(web::Bytes::new())
    }
  }
}

/// Fallback for endpoints that only accept POST
pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
  Err(ApiError::MethodNotAllowed)
}
