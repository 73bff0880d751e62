//! Dialogs and summaries printed to the terminal.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use hexcart_core::{CartSnapshot, Product};
use hexcart_storefront::notify::Notifier;
use hexcart_storefront::view::format_price;

/// Notifier that writes each dialog as a line of text.
///
/// The busy indicator only goes to the debug log; a terminal has nothing to
/// block.
pub struct TerminalNotifier<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Write one line. Terminal write failures are logged, not raised.
    pub fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{text}") {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn show_busy(&self) {
        tracing::debug!("Request in flight");
    }

    fn hide_busy(&self) {
        tracing::debug!("Request finished");
    }

    fn notify_success(&self, message: &str) {
        self.line(&format!("✓ {message}"));
    }

    fn notify_error(&self, title: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => self.line(&format!("✗ {title}: {detail}")),
            None => self.line(&format!("✗ {title}")),
        }
    }
}

/// One line per product: id, category, title and price.
pub fn product_lines<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<String> {
    products
        .into_iter()
        .map(|product| {
            let price = product.price.map(format_price).unwrap_or_default();
            format!(
                "{}  [{}]  {}  {price}",
                product.id, product.category, product.title
            )
        })
        .collect()
}

/// One line per cart line, then the unit count and the server's final total.
pub fn cart_lines(cart: &CartSnapshot) -> Vec<String> {
    if cart.is_empty() {
        return vec![
            "Cart is empty".to_string(),
            format!("Total: {}", format_price(cart.final_total)),
        ];
    }

    let mut lines: Vec<String> = cart
        .carts
        .iter()
        .map(|item| {
            let line_total = item.line_total().map(format_price).unwrap_or_default();
            format!(
                "{}  {} x{}  {line_total}",
                item.id, item.product.title, item.quantity
            )
        })
        .collect();

    lines.push(format!(
        "Total: {} ({} units)",
        format_price(cart.final_total),
        cart.unit_count()
    ));
    lines
}
