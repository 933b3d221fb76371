//! Integer price representation.
//!
//! Prices are whole currency units. The terminal sells in a single currency,
//! so arithmetic between prices never has to reconcile currency codes.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Price {
    /// Amount in whole currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Kenyan shillings.
    #[must_use]
    pub const fn kes(amount: i64) -> Self {
        Self::new(amount, CurrencyCode::KES)
    }

    /// A zero amount in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::kes(0)
    }

    /// The price of `qty` units at this unit price, saturating at the
    /// bounds of `i64`.
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self::new(self.amount.saturating_mul(i64::from(qty)), self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency_code.symbol(), self.amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    KES,
}

impl CurrencyCode {
    /// Display symbol used on screen.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::KES => "KSh",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::KES => "KES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_shilling_symbol() {
        assert_eq!(Price::kes(180).to_string(), "KSh 180");
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::kes(250).times(2), Price::kes(500));
        assert_eq!(Price::kes(250).times(0), Price::zero());
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert_eq!(total, Price::zero());
    }

    #[test]
    fn test_negative_amounts_are_not_rejected() {
        let total: Price = [Price::kes(-50), Price::kes(20)].into_iter().sum();
        assert_eq!(total.amount, -30);
    }

    #[test]
    fn test_large_amounts_saturate() {
        let half = Price::kes(i64::MAX / 2 + 1);
        assert_eq!((half + half).amount, i64::MAX);
        assert_eq!(half.times(2).amount, i64::MAX);
        assert_eq!(Price::kes(i64::MIN).times(3).amount, i64::MIN);

        let total: Price = [half, half, Price::kes(-1)].into_iter().sum();
        assert_eq!(total.amount, i64::MAX - 1);
    }
}
