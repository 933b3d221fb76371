//! Integration tests for Till.
//!
//! The terminal router is driven in-process; no server or port is needed.
//!
//! ```bash
//! cargo test -p till-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `terminal_screen` - Rendering of the category bar, products, and cart
//! - `terminal_cart` - Add, remove, and checkout through the form routes

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use till_core::{Catalog, CheckoutHook};
use till_terminal::config::TerminalConfig;
use till_terminal::middleware::SESSION_COOKIE_NAME;
use till_terminal::state::AppState;

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// One operator's browser: a router plus the session cookie it was given.
///
/// Cloning gives another tab of the same browser: same server, same cookie.
#[derive(Clone)]
pub struct TestTerminal {
    app: Router,
    cookie: Option<String>,
}

impl TestTerminal {
    /// Terminal with the built-in catalog and placeholder checkout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AppState::new(test_config()))
    }

    /// Terminal with a custom checkout hook.
    #[must_use]
    pub fn with_checkout(checkout: impl CheckoutHook + 'static) -> Self {
        Self::with_state(AppState::with_parts(
            test_config(),
            Catalog::builtin(),
            checkout,
        ))
    }

    fn with_state(state: AppState) -> Self {
        Self {
            app: till_terminal::app(state),
            cookie: None,
        }
    }

    /// A second browser sharing the same server but not the session.
    #[must_use]
    pub fn other_browser(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Issue a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request.expect("valid request")).await
    }

    /// Issue a form POST request.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()));
        self.send(request.expect("valid request")).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = session_cookie(response.headers()) {
            self.cookie = Some(cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration with every variable at its default.
///
/// # Panics
///
/// Panics if the defaults stop parsing.
#[must_use]
pub fn test_config() -> TerminalConfig {
    TerminalConfig::from_lookup(|_| None).expect("defaults should parse")
}

/// Extract `name=value` of the session cookie from `Set-Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_owned)
}
