use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use std::net::SocketAddr;

use crate::domain::auth::value_objects::ClientAddress;

/// Request-handling settings shared by the auth handlers
#[derive(Debug, Clone)]
pub struct WebSettings {
  pub cookie_name: String,
  /// Use `Forwarded`/`X-Forwarded-For` for the client address and scheme
  pub trust_proxy_headers: bool,
  /// Include internal error detail in responses
  pub expose_diagnostics: bool,
}

impl WebSettings {
  /// Raw session token sent by the client, if any
  pub fn session_token(&self, req: &HttpRequest) -> Option<String> {
    req
      .cookie(&self.cookie_name)
      .map(|cookie| cookie.value().to_string())
      .filter(|value| !value.is_empty())
  }

  /// Browser-session cookie carrying a freshly issued token
  pub fn session_cookie(&self, req: &HttpRequest, token: String) -> Cookie<'static> {
    Cookie::build(self.cookie_name.clone(), token)
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.is_secure(req))
      .finish()
  }

  /// Cookie that makes the browser drop its session cookie
  pub fn removal_cookie(&self, req: &HttpRequest) -> Cookie<'static> {
    let mut cookie = Cookie::build(self.cookie_name.clone(), "")
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.is_secure(req))
      .finish();
    cookie.make_removal();
    cookie
  }

  fn is_secure(&self, req: &HttpRequest) -> bool {
    if self.trust_proxy_headers {
      req.connection_info().scheme() == "https"
    } else {
      req.app_config().secure()
    }
  }

  /// Throttling key for the request
  pub fn client_address(&self, req: &HttpRequest) -> ClientAddress {
    let address = if self.trust_proxy_headers {
      req
        .connection_info()
        .realip_remote_addr()
        .map(strip_port)
    } else {
      req.peer_addr().map(|addr| addr.ip().to_string())
    };

    address
      .map(ClientAddress::new)
      .unwrap_or_else(ClientAddress::unknown)
  }
}

fn strip_port(address: &str) -> String {
  address
    .parse::<SocketAddr>()
    .map(|addr| addr.ip().to_string())
    .unwrap_or_else(|_| address.to_string())
}
