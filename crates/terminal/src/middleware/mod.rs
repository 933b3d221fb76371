//! HTTP middleware stack for the terminal.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the request span)
//! 4. Security headers
//! 5. Session layer (in-memory store; holds each operator's cart id)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, SESSION_EXPIRY_SECONDS, create_session_layer};
