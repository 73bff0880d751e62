//! LiveJS customer API client implementation.
//!
//! Uses `reqwest` for HTTP and decodes bodies straight into core types.

use std::sync::Arc;

use async_trait::async_trait;
use hexcart_core::{
    CartItemId, CartSnapshot, OrderConfirmation, OrderUser, Product, ProductId, ProductList,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{AddItemBody, ApiError, CartApi, Envelope, OrderBody, UpdateItemBody};
use crate::config::ApiConfig;

/// Error body the service sends alongside a non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
}

/// Client for the LiveJS customer API of one shop.
#[derive(Clone)]
pub struct LiveJsClient {
    inner: Arc<LiveJsClientInner>,
}

struct LiveJsClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl std::fmt::Debug for LiveJsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveJsClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl LiveJsClient {
    /// Create a new client for the configured shop.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client that reuses an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(LiveJsClientInner {
                client,
                endpoint: config.endpoint.clone(),
            }),
        }
    }

    /// The customer endpoint root all paths are joined onto.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Resolve a path relative to the customer endpoint.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .endpoint
            .join(path)
            .map_err(|e| ApiError::Network(format!("invalid request URL {path}: {e}")))
    }

    /// Send a request and decode a success body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = server_message(status.as_u16(), &body);
            tracing::warn!(
                status = %status,
                message = %message,
                "Cart service returned non-success status"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse cart service response"
            );
            ApiError::Decode(e.to_string())
        })
    }
}

/// Extract the human-readable message from an error body.
///
/// Falls back to the generic status wording when the body has no `message`.
fn server_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.message);

    match parsed {
        Some(serde_json::Value::String(message)) if !message.is_empty() => message,
        Some(serde_json::Value::Array(parts)) if !parts.is_empty() => parts
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => format!("Request failed with status code {status}"),
    }
}

#[async_trait]
impl CartApi for LiveJsClient {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.url("products")?;
        let list: ProductList = self.send(self.inner.client.get(url)).await?;
        debug!(count = list.products.len(), "Fetched products");
        Ok(list.products)
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError> {
        let url = self.url("carts")?;
        let cart: CartSnapshot = self.send(self.inner.client.get(url)).await?;
        debug!(lines = cart.carts.len(), "Fetched cart");
        Ok(cart)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let url = self.url("carts")?;
        let body = Envelope {
            data: AddItemBody {
                product_id,
                quantity,
            },
        };
        self.send(self.inner.client.post(url).json(&body)).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let url = self.url("carts")?;
        let body = Envelope {
            data: UpdateItemBody { id, quantity },
        };
        self.send(self.inner.client.patch(url).json(&body)).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_item(&self, id: &CartItemId) -> Result<CartSnapshot, ApiError> {
        let url = self.url(&format!("carts/{}", urlencoding::encode(id.as_str())))?;
        self.send(self.inner.client.delete(url)).await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<CartSnapshot, ApiError> {
        let url = self.url("carts")?;
        self.send(self.inner.client.delete(url)).await
    }

    #[instrument(skip(self, user))]
    async fn submit_order(&self, user: &OrderUser) -> Result<OrderConfirmation, ApiError> {
        let url = self.url("orders")?;
        let body = Envelope {
            data: OrderBody { user },
        };
        let confirmation: OrderConfirmation =
            self.send(self.inner.client.post(url).json(&body)).await?;
        debug!(order_id = %confirmation.id, "Order placed");
        Ok(confirmation)
    }
}
