//! Till Core - point-of-sale domain types.
//!
//! This crate holds everything the terminal needs to know about products and
//! carts:
//! - [`catalog`] - the static product catalog and category filtering
//! - [`cart`] - cart lines and the add/remove/total operations
//! - [`register`] - a cart state holder that notifies listeners on change
//! - [`checkout`] - the checkout extension point
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! rendering, no sessions. The `till-terminal` crate owns all of that.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod register;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogError, CategoryFilter, Product};
pub use checkout::{CheckoutHook, PlaceholderCheckout};
pub use register::{CartEvent, Register};
pub use types::*;
