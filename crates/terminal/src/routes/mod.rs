//! HTTP route handlers for the terminal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - POS screen (?category=<label>, default "all")
//! GET  /health                 - Health check
//!
//! # Cart (form posts, redirect back to the screen)
//! POST /cart/add               - Add one unit of a product
//! POST /cart/remove            - Remove a product's line
//!
//! # Checkout
//! POST /checkout               - Run the checkout hook
//! ```

pub mod cart;
pub mod screen;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the terminal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(screen::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
}
