//! Cart snapshot as returned by every cart endpoint.

use serde::{Deserialize, Serialize};

use super::id::CartItemId;
use super::price::Price;
use super::product::Product;

/// One line in the remote cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Server-assigned line identifier (distinct from the product id).
    pub id: CartItemId,
    /// Product snapshot embedded by the server.
    #[serde(default)]
    pub product: Product,
    /// Number of units, always at least 1 on the server side.
    pub quantity: u32,
}

impl CartItem {
    /// Quantity multiplied by the unit price, if the product has a price.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.product.price.map(|price| price.times(self.quantity))
    }
}

/// The full cart state. Always replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart lines in server order.
    #[serde(default)]
    pub carts: Vec<CartItem>,
    /// Pre-discount total computed by the server.
    #[serde(default)]
    pub total: Price,
    /// Amount due, computed by the server.
    #[serde(default)]
    pub final_total: Price,
}

impl CartSnapshot {
    /// Look up a line by its identifier.
    #[must_use]
    pub fn item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.carts.iter().find(|item| &item.id == id)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.carts.iter().map(|item| item.quantity).sum()
    }
}
