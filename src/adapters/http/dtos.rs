use actix_web::HttpRequest;
use actix_web::http::header;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::concepts::{Concept, ConceptSummary};

/// Content type of every JSON response
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Flat set of string fields posted by the client.
///
/// Browsers post forms; scripts usually post JSON. The form body wins when it
/// carries any field, otherwise the body is read as a JSON object. Anything
/// unreadable yields an empty set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestFields(HashMap<String, String>);

impl RequestFields {
  pub fn parse(req: &HttpRequest, body: &[u8]) -> Self {
    if is_form(req) {
      if let Ok(fields) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
        if !fields.is_empty() {
          return Self(fields.into_iter().collect());
        }
      }
    }

    Self::from_json(body)
  }

  fn from_json(body: &[u8]) -> Self {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) else {
      return Self::default();
    };

    let fields = map
      .into_iter()
      .filter_map(|(key, value)| {
        let value = match value {
          serde_json::Value::String(s) => s,
          serde_json::Value::Number(n) => n.to_string(),
          serde_json::Value::Bool(b) => b.to_string(),
          _ => return None,
        };
        Some((key, value))
      })
      .collect();

    Self(fields)
  }

  pub fn take(&mut self, name: &str) -> Option<String> {
    self.0.remove(name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

fn is_form(req: &HttpRequest) -> bool {
  req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|value| value.to_str().ok())
    .map(|value| {
      value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .eq_ignore_ascii_case("application/x-www-form-urlencoded")
    })
    .unwrap_or(false)
}

/// Request for login (`user`, `pass`)
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
  pub user: String,
  pub pass: String,
}

impl From<RequestFields> for LoginRequest {
  fn from(mut fields: RequestFields) -> Self {
    Self {
      user: fields.take("user").unwrap_or_default(),
      pass: fields.take("pass").unwrap_or_default(),
    }
  }
}

/// Request for registration (`user`, `pass`, optional `email`)
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
  pub user: String,
  pub pass: String,
  pub email: Option<String>,
}

impl From<RequestFields> for RegisterRequest {
  fn from(mut fields: RequestFields) -> Self {
    Self {
      user: fields.take("user").unwrap_or_default(),
      pass: fields.take("pass").unwrap_or_default(),
      email: fields.take("email"),
    }
  }
}

/// Response after successful login or registration
#[derive(Debug, Clone, Serialize)]
pub struct AuthSuccessResponse {
  pub success: bool,
  /// Account name
  pub user: String,
}

impl AuthSuccessResponse {
  pub fn new(user: impl Into<String>) -> Self {
    Self {
      success: true,
      user: user.into(),
    }
  }
}

/// Who is logged in, if anyone
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub logged: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user: Option<String>,
}

impl CurrentUserResponse {
  pub fn logged_in(user: impl Into<String>) -> Self {
    Self {
      logged: true,
      user: Some(user.into()),
    }
  }

  pub fn anonymous() -> Self {
    Self {
      logged: false,
      user: None,
    }
  }
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
}

impl SuccessResponse {
  pub fn ok() -> Self {
    Self { success: true }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub success: bool,
  /// Message shown to the player
  pub message: String,
  /// Internal detail, only outside production
  #[serde(skip_serializing_if = "Option::is_none")]
  pub debug: Option<String>,
}

/// Concept listing entry
#[derive(Debug, Clone, Serialize)]
pub struct ConceptSummaryResponse {
  pub slug: String,
  pub title: String,
  pub summary: String,
}

impl From<ConceptSummary> for ConceptSummaryResponse {
  fn from(summary: ConceptSummary) -> Self {
    Self {
      slug: summary.slug.to_string(),
      title: summary.title.to_string(),
      summary: summary.summary.to_string(),
    }
  }
}

/// Full concept with its sections
#[derive(Debug, Clone, Serialize)]
pub struct ConceptResponse {
  pub slug: String,
  pub title: String,
  pub summary: String,
  pub sections: Vec<ConceptSectionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConceptSectionResponse {
  pub heading: String,
  pub paragraphs: Vec<String>,
  pub items: Vec<String>,
}

impl From<&Concept> for ConceptResponse {
  fn from(concept: &Concept) -> Self {
    Self {
      slug: concept.slug.to_string(),
      title: concept.title.to_string(),
      summary: concept.summary.to_string(),
      sections: concept
        .sections
        .iter()
        .map(|section| ConceptSectionResponse {
          heading: section.heading.to_string(),
          paragraphs: section.paragraphs.iter().map(|p| p.to_string()).collect(),
          items: section.items.iter().map(|i| i.to_string()).collect(),
        })
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_form_body_is_read_first() {
    let req = TestRequest::default()
      .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
      .to_http_request();

    let login = LoginRequest::from(RequestFields::parse(&req, b"user=alice&pass=s%20cret"));

    assert_eq!(login.user, "alice");
    assert_eq!(login.pass, "s cret");
  }

  #[test]
  fn test_json_body_used_when_form_is_empty() {
    let req = TestRequest::default()
      .insert_header((header::CONTENT_TYPE, "application/json"))
      .to_http_request();

    let register = RegisterRequest::from(RequestFields::parse(
      &req,
      br#"{"user":"bob","pass":"pw","email":"bob@costa.gg"}"#,
    ));

    assert_eq!(register.user, "bob");
    assert_eq!(register.pass, "pw");
    assert_eq!(register.email.as_deref(), Some("bob@costa.gg"));
  }

  #[test]
  fn test_json_posted_as_form_is_not_reparsed() {
    let req = TestRequest::default()
      .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
      .to_http_request();

    // The document parses as a single form key with no value
    let login = LoginRequest::from(RequestFields::parse(&req, br#"{"user":"bob","pass":"pw"}"#));

    assert_eq!(login.user, "");
    assert_eq!(login.pass, "");
  }

  #[test]
  fn test_garbage_body_is_empty_input() {
    let req = TestRequest::default().to_http_request();

    assert!(RequestFields::parse(&req, b"not json").is_empty());
    assert!(RequestFields::parse(&req, b"[1,2]").is_empty());
    assert!(RequestFields::parse(&req, b"").is_empty());
  }

  #[test]
  fn test_json_numbers_are_kept_as_text() {
    let req = TestRequest::default().to_http_request();
    let login = LoginRequest::from(RequestFields::parse(&req, br#"{"user":"bob","pass":1234}"#));

    assert_eq!(login.pass, "1234");
  }

  #[test]
  fn test_error_response_omits_missing_debug() {
    let body = serde_json::to_value(ErrorResponse {
      success: false,
      message: "Credenciales inválidas".to_string(),
      debug: None,
    })
    .unwrap();

    assert_eq!(
      body,
      serde_json::json!({"success": false, "message": "Credenciales inválidas"})
    );
  }
}
