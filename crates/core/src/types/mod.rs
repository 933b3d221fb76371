//! Core value types for Till.
//!
//! This module provides type-safe wrappers for product identity and money.

pub mod id;
pub mod price;

pub use id::*;
pub use price::{CurrencyCode, Price};
