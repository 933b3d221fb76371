//! Cart route handlers.
//!
//! The operator's session holds the id of their cart in the [`CartStore`].
//! Every handler applies one operation to that cart through a [`Register`]
//! while holding the cart's lock, then redirects to the screen the form was
//! posted from.
//!
//! [`CartStore`]: crate::carts::CartStore

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use till_core::catalog::ALL_CATEGORIES;
use till_core::{Cart, CartEvent, ProductId, Register};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::screen::screen_href;
use crate::state::AppState;

/// Session key for the id of the operator's cart.
pub const CART_ID_KEY: &str = "cart_id";

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart id from the session, if one was assigned.
async fn cart_id(session: &Session) -> Result<Option<Uuid>> {
    Ok(session.get::<Uuid>(CART_ID_KEY).await?)
}

/// Get the cart id from the session, assigning a new one on first use.
async fn ensure_cart_id(session: &Session) -> Result<Uuid> {
    if let Some(id) = cart_id(session).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(CART_ID_KEY, id).await?;
    Ok(id)
}

/// Get a copy of the session's cart, or an empty cart for a new session.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn load_cart(state: &AppState, session: &Session) -> Result<Cart> {
    Ok(match cart_id(session).await? {
        Some(id) => state.carts().snapshot(id).await,
        None => Cart::new(),
    })
}

/// Apply `change` to cart `id` through a register that reports every change.
async fn with_register(state: &AppState, id: Uuid, change: impl FnOnce(&mut Register)) {
    state
        .carts()
        .update(id, |cart| {
            let mut register = Register::new(std::mem::take(cart));
            register.subscribe(log_cart_event);
            change(&mut register);
            *cart = register.into_cart();
        })
        .await;
}

fn log_cart_event(event: &CartEvent, cart: &Cart) {
    let total = cart.total();
    match event {
        CartEvent::Added { id, qty } => {
            tracing::info!(product_id = %id, qty, %total, "Added to cart");
            add_breadcrumb("cart", "Added to cart", &[("product_id", id.as_str())]);
        }
        CartEvent::Removed { id } => {
            tracing::info!(product_id = %id, %total, "Removed from cart");
            add_breadcrumb("cart", "Removed from cart", &[("product_id", id.as_str())]);
        }
    }
}

fn back_to(category: Option<&str>) -> Redirect {
    Redirect::to(&screen_href(category.unwrap_or(ALL_CATEGORIES)))
}

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub product_id: String,
    /// Category selected when the form was posted.
    pub category: Option<String>,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub category: Option<String>,
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartLineForm>,
) -> Result<Redirect> {
    if form.product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let cart_id = ensure_cart_id(&session).await?;
    with_register(&state, cart_id, |register| register.add(product)).await;

    Ok(back_to(form.category.as_deref()))
}

/// Remove a product's line from the cart.
///
/// Ids that are not in the cart (or not in the catalog) are ignored.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartLineForm>,
) -> Result<Redirect> {
    if let Some(cart_id) = cart_id(&session).await? {
        let id = ProductId::new(form.product_id);
        with_register(&state, cart_id, |register| register.remove(&id)).await;
    }

    Ok(back_to(form.category.as_deref()))
}

/// Run the checkout hook on the current cart.
///
/// The cart is left as it is; what checkout means is up to the hook.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect> {
    let cart = load_cart(&state, &session).await?;
    tracing::info!(
        lines = cart.lines().len(),
        total = %cart.total(),
        "Checkout requested"
    );
    state.checkout().checkout(&cart);

    Ok(back_to(form.category.as_deref()))
}
