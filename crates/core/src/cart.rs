//! Shopping cart lines and operations.
//!
//! A cart holds at most one line per product id, in the order products were
//! first added. The only mutations are [`Cart::add`] and [`Cart::remove`]; the
//! total is derived from the lines on every read.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product as it was when first added.
    pub product: Product,
    /// Always at least 1.
    pub qty: u32,
}

impl CartLine {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * qty` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.qty)
    }
}

/// An ordered collection of cart lines keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line in place, or appends a new line with a
    /// quantity of 1. Returns the line's quantity after the add.
    pub fn add(&mut self, product: &Product) -> u32 {
        let existing = self.lines.iter_mut().find(|line| line.product.id == product.id);
        if let Some(line) = existing {
            line.qty = line.qty.saturating_add(1);
            return line.qty;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            qty: 1,
        });
        1
    }

    /// Remove the line for `id`, returning it if it was present.
    ///
    /// Removing an id that is not in the cart leaves the cart untouched.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.product.id == *id)?;
        Some(self.lines.remove(index))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    /// Sum of `price * qty` over all lines; zero for an empty cart.
    ///
    /// Saturates instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
