//! Checkout extension point.
//!
//! The terminal shows a checkout button, but payment and order capture are
//! out of scope. A [`CheckoutHook`] is what the button calls; the default
//! [`PlaceholderCheckout`] does nothing and leaves the cart as it is.

use crate::cart::Cart;

/// Called when the operator presses checkout.
pub trait CheckoutHook: Send + Sync {
    fn checkout(&self, cart: &Cart);
}

/// Checkout that has no observable effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCheckout;

impl CheckoutHook for PlaceholderCheckout {
    fn checkout(&self, _cart: &Cart) {}
}
