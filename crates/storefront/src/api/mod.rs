//! Remote cart service client.
//!
//! # Architecture
//!
//! - [`CartApi`] is the seam the controller talks to; one method per remote
//!   action, each a single round trip.
//! - [`LiveJsClient`] implements it over `reqwest` against the LiveJS
//!   customer API.
//! - The remote service is the source of truth: nothing is cached, retried
//!   or timed out here. Failures surface to the caller as-is.
//!
//! # Endpoints
//!
//! ```text
//! GET    {endpoint}/products    - product catalog
//! GET    {endpoint}/carts       - cart snapshot
//! POST   {endpoint}/carts       - add item        { data: { productId, quantity } }
//! PATCH  {endpoint}/carts       - update quantity { data: { id, quantity } }
//! DELETE {endpoint}/carts/{id}  - delete item
//! DELETE {endpoint}/carts       - clear cart
//! POST   {endpoint}/orders      - submit order    { data: { user } }
//! ```

mod client;

use std::sync::Arc;

use async_trait::async_trait;
use hexcart_core::{CartItemId, CartSnapshot, OrderConfirmation, OrderUser, Product, ProductId};
use serde::Serialize;
use thiserror::Error;

pub use client::LiveJsClient;

/// Errors that can occur when talking to the cart service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A success response carried a body that is not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The raw failure message, without the variant prefix.
    ///
    /// This is what the error dialog shows as its detail line.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network(message) | Self::Decode(message) => message,
            Self::Server { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Operations offered by the remote cart service.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Fetch the full product catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch the current cart.
    async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError>;

    /// Add `quantity` units of a product.
    async fn add_item(&self, product_id: &ProductId, quantity: u32)
    -> Result<CartSnapshot, ApiError>;

    /// Set the quantity of an existing cart line.
    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError>;

    /// Remove one cart line.
    async fn delete_item(&self, id: &CartItemId) -> Result<CartSnapshot, ApiError>;

    /// Remove every cart line.
    async fn clear_cart(&self) -> Result<CartSnapshot, ApiError>;

    /// Place an order for the current cart.
    async fn submit_order(&self, user: &OrderUser) -> Result<OrderConfirmation, ApiError>;
}

#[async_trait]
impl<T: CartApi + ?Sized> CartApi for Arc<T> {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        (**self).fetch_products().await
    }

    async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError> {
        (**self).fetch_cart().await
    }

    async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        (**self).add_item(product_id, quantity).await
    }

    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        (**self).update_quantity(id, quantity).await
    }

    async fn delete_item(&self, id: &CartItemId) -> Result<CartSnapshot, ApiError> {
        (**self).delete_item(id).await
    }

    async fn clear_cart(&self) -> Result<CartSnapshot, ApiError> {
        (**self).clear_cart().await
    }

    async fn submit_order(&self, user: &OrderUser) -> Result<OrderConfirmation, ApiError> {
        (**self).submit_order(user).await
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Every mutating request wraps its payload in `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemBody<'a> {
    pub product_id: &'a ProductId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateItemBody<'a> {
    pub id: &'a CartItemId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderBody<'a> {
    pub user: &'a OrderUser,
}
