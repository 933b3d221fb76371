//! Till Terminal library.
//!
//! Serves the point-of-sale screen: a category bar, the product grid, and the
//! operator's cart. The router lives here so it can be tested in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the terminal router with its middleware stack.
///
/// Sentry layers are left to the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let assets = ServeDir::new(&state.config().assets_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/assets", assets)
        .nest_service("/static", ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
