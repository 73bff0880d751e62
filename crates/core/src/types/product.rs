//! Catalog product as served by the remote cart service.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog product.
///
/// Every field defaults when absent so a sparse catalog entry still renders
/// (as empty text) instead of failing the whole catalog decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Server-assigned product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Category used by the catalog filter.
    pub category: String,
    /// Current selling price.
    pub price: Option<Price>,
    /// Pre-discount price.
    pub origin_price: Option<Price>,
    /// Image URL.
    pub images: String,
    /// Long description (not shown on cards).
    pub description: String,
}

/// Response body of the product listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}
