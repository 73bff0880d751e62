//! Integration tests for Hexcart.
//!
//! These talk to the live LiveJS customer API and change the cart of the
//! configured shop, so every test is `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! HEXCART_API_PATH=<shop> cargo test -p hexcart-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! Tests share one remote cart and must run one at a time.

use hexcart_storefront::api::LiveJsClient;
use hexcart_storefront::config::{ApiConfig, ConfigError};

/// Client for the shop named by `HEXCART_API_PATH`.
///
/// # Errors
///
/// Returns an error if the API variables are missing or invalid.
pub fn live_client() -> Result<LiveJsClient, ConfigError> {
    let config = ApiConfig::from_env()?;
    Ok(LiveJsClient::new(&config))
}

/// Client for a shop path the service does not know.
///
/// # Errors
///
/// Returns an error if `HEXCART_API_BASE` is set but invalid.
pub fn unknown_shop_client() -> Result<LiveJsClient, ConfigError> {
    dotenvy::dotenv().ok();
    let base = std::env::var("HEXCART_API_BASE")
        .unwrap_or_else(|_| hexcart_storefront::config::DEFAULT_API_BASE.to_string());
    let config = ApiConfig::new(&base, "hexcart-no-such-shop-0000")?;
    Ok(LiveJsClient::new(&config))
}
