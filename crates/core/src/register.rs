//! Cart state holder with change notification.
//!
//! [`Register`] wraps a [`Cart`] and tells subscribed listeners about every
//! change. Operations that change nothing (removing an id that is not in the
//! cart) notify no one.

use std::fmt;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::types::ProductId;

/// A change made to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// One unit was added; `qty` is the line's quantity afterwards.
    Added { id: ProductId, qty: u32 },
    /// The whole line was removed.
    Removed { id: ProductId },
}

type Listener = Box<dyn FnMut(&CartEvent, &Cart) + Send>;

/// Owns one cart and notifies listeners after each change.
#[derive(Default)]
pub struct Register {
    cart: Cart,
    listeners: Vec<Listener>,
}

impl Register {
    /// Wrap an existing cart.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            listeners: Vec::new(),
        }
    }

    /// Register a listener called with the event and the updated cart.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CartEvent, &Cart) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Current cart.
    #[must_use]
    pub const fn get(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        let qty = self.cart.add(product);
        self.notify(&CartEvent::Added {
            id: product.id.clone(),
            qty,
        });
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &ProductId) {
        if let Some(line) = self.cart.remove(id) {
            self.notify(&CartEvent::Removed {
                id: line.product.id,
            });
        }
    }

    /// Release the cart, dropping all listeners.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    fn notify(&mut self, event: &CartEvent) {
        for listener in &mut self.listeners {
            listener(event, &self.cart);
        }
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Register")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::Price;

    fn latte() -> Product {
        Product::new("3", "Latte", Price::kes(280), "coffee", "/latte.jpg")
    }

    fn recording(register: &mut Register) -> Arc<Mutex<Vec<(CartEvent, Price)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        register.subscribe(move |event, cart| {
            sink.lock().unwrap().push((event.clone(), cart.total()));
        });
        seen
    }

    #[test]
    fn test_listeners_see_updated_cart() {
        let mut register = Register::default();
        let seen = recording(&mut register);

        register.add(&latte());
        register.add(&latte());
        register.remove(&ProductId::new("3"));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [
                (
                    CartEvent::Added { id: ProductId::new("3"), qty: 1 },
                    Price::kes(280)
                ),
                (
                    CartEvent::Added { id: ProductId::new("3"), qty: 2 },
                    Price::kes(560)
                ),
                (CartEvent::Removed { id: ProductId::new("3") }, Price::zero()),
            ]
        );
    }

    #[test]
    fn test_removing_absent_id_is_silent() {
        let mut register = Register::default();
        register.add(&latte());
        let seen = recording(&mut register);

        register.remove(&ProductId::new("8"));

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(register.get().lines().len(), 1);
    }

    #[test]
    fn test_into_cart_keeps_state() {
        let mut register = Register::new(Cart::new());
        register.add(&latte());
        let cart = register.into_cart();
        assert_eq!(cart.total(), Price::kes(280));
    }
}
