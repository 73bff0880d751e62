//! Type-safe price representation using decimal arithmetic.
//!
//! The remote catalog quotes every amount in the shop's single currency as a
//! bare JSON number, so a price carries no currency code of its own.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount as quoted by the cart service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // JSON floats like 1500.0 should read as 1500
        write!(f, "{}", self.0.normalize())
    }
}
