//! Cart controller: owns page state and synchronizes it with the cart service.
//!
//! Every networked operation follows the same protocol:
//!
//! 1. open the busy indicator (a [`BusyGuard`], closed on every exit path)
//! 2. issue exactly one API call
//! 3. on success replace the affected state with the response verbatim,
//!    re-render, and for user-visible actions show a success dialog
//! 4. on failure show an error dialog with a fixed title and the raw message;
//!    state is left untouched
//!
//! Client-side checks run before the busy indicator opens. An incomplete
//! order form reports an error; a missing cart line or a quantity that would
//! drop below one abandons the operation silently.

use std::sync::Arc;

use hexcart_core::{CartItemId, CartSnapshot, Product, ProductId};
use tracing::{debug, error, instrument, warn};

use crate::api::{ApiError, CartApi};
use crate::notify::{BusyGuard, Notifier};
use crate::view::{self, ALL_CATEGORIES, Page, Region};

/// Dialog titles and messages shown by the controller.
pub mod messages {
    pub const INIT_FAILED: &str = "Failed to initialize";
    pub const ADDED: &str = "Added to cart";
    pub const ADD_FAILED: &str = "Failed to add to cart";
    pub const QUANTITY_FAILED: &str = "Failed to update quantity";
    pub const DELETED: &str = "Removed from cart";
    pub const DELETE_FAILED: &str = "Failed to delete item";
    pub const CLEARED: &str = "Cart cleared";
    pub const CLEAR_FAILED: &str = "Failed to clear cart";
    pub const ORDER_INCOMPLETE: &str = "Order details incomplete";
    pub const ORDER_SUBMITTED: &str = "Order submitted";
    pub const ORDER_FAILED: &str = "Failed to submit order";
    pub const CART_REFRESH_FAILED: &str = "Failed to load cart";
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and state was replaced, or a local-only
    /// operation ran.
    Applied,
    /// Abandoned before any request, without telling the user.
    Skipped,
    /// Abandoned before any request, with a validation dialog.
    Rejected,
    /// The request failed; state is unchanged.
    Failed,
}

/// Client-side state owner for one shop page.
pub struct CartController<A, N: ?Sized> {
    api: A,
    notifier: Arc<N>,
    products: Vec<Product>,
    cart: CartSnapshot,
    page: Page,
}

impl<A, N> CartController<A, N>
where
    A: CartApi,
    N: Notifier + ?Sized,
{
    /// Create a controller with empty state.
    pub fn new(api: A, notifier: Arc<N>) -> Self {
        Self {
            api,
            notifier,
            products: Vec::new(),
            cart: CartSnapshot::default(),
            page: Page::default(),
        }
    }

    /// The catalog from the last successful load.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The cart snapshot from the last successful cart response.
    #[must_use]
    pub fn cart(&self) -> &CartSnapshot {
        &self.cart
    }

    /// The rendered page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page access, for hosts that copy form input into it.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// The notifier dialogs are reported through.
    #[must_use]
    pub fn notifier(&self) -> &Arc<N> {
        &self.notifier
    }

    fn busy(&self) -> BusyGuard<N> {
        BusyGuard::enter(Arc::clone(&self.notifier))
    }

    fn report(&self, title: &str, err: &ApiError) {
        warn!(error = %err, "{title}");
        self.notifier.notify_error(title, Some(err.message()));
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Initial page load: fetch catalog and cart together, render both.
    ///
    /// All-or-nothing: if either fetch fails neither view is populated.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Outcome {
        let _busy = self.busy();

        let fetched = tokio::try_join!(self.api.fetch_products(), self.api.fetch_cart());
        match fetched {
            Ok((products, cart)) => {
                debug!(products = products.len(), lines = cart.carts.len(), "Page loaded");
                self.products = products;
                self.page.categories = view::render_categories(&self.products);
                self.page.selected_category = ALL_CATEGORIES.to_string();
                render_grid(&self.products, &mut self.page.product_grid);
                self.replace_cart(cart);
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::INIT_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Re-render the catalog filtered to one category. No network call.
    #[instrument(skip(self))]
    pub fn filter(&mut self, category: &str) -> Outcome {
        self.page.selected_category = category.to_string();
        let filtered = view::filter_by_category(&self.products, category);
        render_grid(filtered, &mut self.page.product_grid);
        Outcome::Applied
    }

    /// Add one unit of a product to the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(&mut self, product_id: &ProductId) -> Outcome {
        let _busy = self.busy();

        match self.api.add_item(product_id, 1).await {
            Ok(cart) => {
                self.replace_cart(cart);
                self.notifier.notify_success(messages::ADDED);
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::ADD_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Step a cart line's quantity by `delta`.
    ///
    /// Unknown lines and results below one are dropped without a request.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn change_quantity(&mut self, id: &CartItemId, delta: i64) -> Outcome {
        let Some(item) = self.cart.item(id) else {
            debug!("Cart line not in current state");
            return Outcome::Skipped;
        };

        let Some(quantity) = next_quantity(item.quantity, delta) else {
            debug!(current = item.quantity, delta, "Quantity would drop below one");
            return Outcome::Skipped;
        };

        let _busy = self.busy();

        match self.api.update_quantity(id, quantity).await {
            Ok(cart) => {
                self.replace_cart(cart);
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::QUANTITY_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Remove one cart line.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_item(&mut self, id: &CartItemId) -> Outcome {
        let _busy = self.busy();

        match self.api.delete_item(id).await {
            Ok(cart) => {
                self.replace_cart(cart);
                self.notifier.notify_success(messages::DELETED);
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::DELETE_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Remove every cart line.
    #[instrument(skip(self))]
    pub async fn clear_cart(&mut self) -> Outcome {
        let _busy = self.busy();

        match self.api.clear_cart().await {
            Ok(cart) => {
                self.replace_cart(cart);
                self.notifier.notify_success(messages::CLEARED);
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::CLEAR_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Submit the order form.
    ///
    /// On success the form is cleared and the cart re-fetched once, since the
    /// server empties the cart when it accepts an order. On failure the form
    /// keeps what was typed.
    #[instrument(skip(self))]
    pub async fn submit_order(&mut self) -> Outcome {
        if !self.page.order_form.is_complete() {
            self.notifier.notify_error(messages::ORDER_INCOMPLETE, None);
            return Outcome::Rejected;
        }

        let _busy = self.busy();

        let user = self.page.order_form.clone();
        match self.api.submit_order(&user).await {
            Ok(_) => {
                self.notifier.notify_success(messages::ORDER_SUBMITTED);
                self.page.order_form.clear();
                self.refresh_cart().await;
                Outcome::Applied
            }
            Err(err) => {
                self.report(messages::ORDER_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Re-fetch the cart. Runs inside the caller's busy scope.
    async fn refresh_cart(&mut self) {
        match self.api.fetch_cart().await {
            Ok(cart) => self.replace_cart(cart),
            Err(err) => self.report(messages::CART_REFRESH_FAILED, &err),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn replace_cart(&mut self, cart: CartSnapshot) {
        self.cart = cart;
        if let Err(e) = view::render_cart(
            &self.cart,
            &mut self.page.cart_body,
            &mut self.page.total_display,
        ) {
            error!(error = %e, "Failed to render cart");
        }
    }
}

fn render_grid<'a>(products: impl IntoIterator<Item = &'a Product>, grid: &mut Region) {
    if let Err(e) = view::render_product_list(products, grid) {
        error!(error = %e, "Failed to render product list");
    }
}

/// The quantity after stepping by `delta`, or `None` if it would be below one.
fn next_quantity(current: u32, delta: i64) -> Option<u32> {
    let next = i64::from(current).checked_add(delta)?;
    if next < 1 {
        return None;
    }
    u32::try_from(next).ok()
}
