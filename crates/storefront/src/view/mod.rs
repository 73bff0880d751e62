//! Page model and markup rendering.
//!
//! Rendering is full-replace: each render call rebuilds a region's markup
//! from the data it is given and overwrites whatever the region held. The
//! renderer keeps no state; it only borrows products and cart snapshots for
//! the duration of a call.

use std::fmt;

use askama::Template;
use hexcart_core::{CartItem, CartSnapshot, OrderUser, Price, Product};

/// Currency prefix shown before every amount.
pub const CURRENCY_PREFIX: &str = "NT$";

/// Category value that disables catalog filtering.
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Page Model
// =============================================================================

/// A page container holding already-rendered markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region(String);

impl Region {
    /// Replace the region's contents wholesale.
    pub fn replace(&mut self, markup: String) {
        self.0 = markup;
    }

    /// The current markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the shop page displays, owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Product card grid.
    pub product_grid: Region,
    /// Options of the category select, in catalog order.
    pub categories: Vec<String>,
    /// Currently selected category (or [`ALL_CATEGORIES`]).
    pub selected_category: String,
    /// Cart table rows.
    pub cart_body: Region,
    /// Grand total text.
    pub total_display: Region,
    /// The five order inputs, as typed.
    pub order_form: OrderUser,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            product_grid: Region::default(),
            categories: Vec::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            cart_body: Region::default(),
            total_display: Region::default(),
            order_form: OrderUser::default(),
        }
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub origin_price: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            image: product.images.clone(),
            origin_price: format_optional_price(product.origin_price),
            price: format_optional_price(product.price),
        }
    }
}

/// Cart row display data for templates.
#[derive(Debug, Clone)]
pub struct CartRowView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for CartRowView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.product.title.clone(),
            image: item.product.images.clone(),
            unit_price: format_optional_price(item.product.price),
            quantity: item.quantity,
            line_total: format_optional_price(item.line_total()),
        }
    }
}

/// Format an amount with the shop's currency prefix.
#[must_use]
pub fn format_price(price: Price) -> String {
    format!("{CURRENCY_PREFIX}{price}")
}

/// Format an amount, rendering a missing one as empty text.
fn format_optional_price(price: Option<Price>) -> String {
    price.map(format_price).unwrap_or_default()
}

// =============================================================================
// Templates
// =============================================================================

/// Product grid fragment.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

/// Cart table body fragment.
#[derive(Template)]
#[template(path = "partials/cart_rows.html")]
pub struct CartRowsTemplate {
    pub rows: Vec<CartRowView>,
}

// =============================================================================
// Renderers
// =============================================================================

/// Render product cards into `container`, replacing its contents.
///
/// # Errors
///
/// Returns an error if template rendering fails; the container is left
/// untouched in that case.
pub fn render_product_list<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    container: &mut Region,
) -> askama::Result<()> {
    let template = ProductGridTemplate {
        cards: products.into_iter().map(ProductCardView::from).collect(),
    };
    container.replace(template.render()?);
    Ok(())
}

/// Render cart rows into `table_body` and the server's final total into
/// `total_display`.
///
/// The grand total is taken from the snapshot verbatim, never summed here.
///
/// # Errors
///
/// Returns an error if template rendering fails; neither region is touched
/// in that case.
pub fn render_cart(
    snapshot: &CartSnapshot,
    table_body: &mut Region,
    total_display: &mut Region,
) -> askama::Result<()> {
    let template = CartRowsTemplate {
        rows: snapshot.carts.iter().map(CartRowView::from).collect(),
    };
    let rows = template.render()?;
    table_body.replace(rows);
    total_display.replace(format_price(snapshot.final_total));
    Ok(())
}

/// Distinct product categories in first-seen order.
#[must_use]
pub fn render_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Products matching `category` exactly, in catalog order.
///
/// [`ALL_CATEGORIES`] returns the whole catalog.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}
