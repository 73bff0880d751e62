//! Shop commands.
//!
//! Every command opens the shop the way the page does (catalog and cart
//! fetched together), applies one page event and prints the result.
//!
//! # Usage
//!
//! ```bash
//! hexcart products --category sofa
//! hexcart add <product-id>
//! hexcart inc <item-id>
//! hexcart order --name Ada --tel 0912345678 --email ada@example.com \
//!     --address Taipei --payment ATM
//! ```

use std::io::{Write, stdout};
use std::sync::Arc;

use hexcart_core::{CartItemId, OrderUser, ProductId};
use hexcart_storefront::api::{CartApi, LiveJsClient};
use hexcart_storefront::config::{ApiConfig, ConfigError};
use hexcart_storefront::controller::{CartController, Outcome};
use hexcart_storefront::event::{UiEvent, dispatch};
use hexcart_storefront::view::{ALL_CATEGORIES, filter_by_category};
use thiserror::Error;

use super::terminal::{TerminalNotifier, cart_lines, product_lines};

/// Errors that stop a shop command.
#[derive(Debug, Error)]
pub enum ShopError {
    /// The API settings are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The shop could not be opened.
    #[error("Could not load the shop")]
    LoadFailed,

    /// The command's event did not go through.
    #[error("Command {0} did not complete")]
    NotApplied(&'static str),
}

/// What to do once the shop is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    /// List the catalog, optionally filtered to one category.
    Products { category: Option<String> },
    /// Show the cart.
    Cart,
    /// Add one unit of a product.
    Add { product_id: String },
    /// Step a cart line up by one.
    Increment { id: String },
    /// Step a cart line down by one.
    Decrement { id: String },
    /// Remove a cart line.
    Delete { id: String },
    /// Empty the cart.
    Clear,
    /// Submit an order.
    Order { user: OrderUser },
}

impl ShopCommand {
    /// The page event this command stands for. Showing the cart needs none.
    pub fn event(&self) -> Option<UiEvent> {
        let event = match self {
            Self::Products { category } => UiEvent::FilterChange {
                category: category
                    .clone()
                    .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            },
            Self::Cart => return None,
            Self::Add { product_id } => UiEvent::AddClick {
                product_id: ProductId::new(product_id.as_str()),
            },
            Self::Increment { id } => UiEvent::QuantityClick {
                id: CartItemId::new(id.as_str()),
                delta: 1,
            },
            Self::Decrement { id } => UiEvent::QuantityClick {
                id: CartItemId::new(id.as_str()),
                delta: -1,
            },
            Self::Delete { id } => UiEvent::DeleteClick {
                id: CartItemId::new(id.as_str()),
            },
            Self::Clear => UiEvent::ClearClick,
            Self::Order { .. } => UiEvent::SubmitClick,
        };
        Some(event)
    }
}

/// Run one command against the remote cart service.
///
/// # Errors
///
/// Returns an error if the API settings are invalid, the shop cannot be
/// loaded, or the command's event fails or is rejected.
pub async fn run(api_base: &str, api_path: &str, command: ShopCommand) -> Result<(), ShopError> {
    let api = LiveJsClient::new(&ApiConfig::new(api_base, api_path)?);
    tracing::debug!(endpoint = %api.endpoint(), "Using cart service");

    let notifier = Arc::new(TerminalNotifier::new(stdout()));
    execute(api, notifier, command).await
}

async fn execute<A: CartApi, W: Write + Send>(
    api: A,
    notifier: Arc<TerminalNotifier<W>>,
    command: ShopCommand,
) -> Result<(), ShopError> {
    let mut controller = CartController::new(api, Arc::clone(&notifier));

    if dispatch(&mut controller, UiEvent::Load).await != Outcome::Applied {
        return Err(ShopError::LoadFailed);
    }

    if let ShopCommand::Order { user } = &command {
        controller.page_mut().order_form = user.clone();
    }

    if let Some(event) = command.event() {
        let name = event.name();
        match dispatch(&mut controller, event).await {
            Outcome::Applied => {}
            Outcome::Skipped => notifier.line("Nothing to change"),
            Outcome::Rejected | Outcome::Failed => return Err(ShopError::NotApplied(name)),
        }
    }

    let lines = match &command {
        ShopCommand::Products { .. } => {
            let category = &controller.page().selected_category;
            product_lines(filter_by_category(controller.products(), category))
        }
        _ => cart_lines(controller.cart()),
    };
    for line in lines {
        notifier.line(&line);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use hexcart_core::{
        CartItem, CartSnapshot, OrderConfirmation, Price, Product,
    };
    use hexcart_storefront::api::ApiError;

    use super::*;

    /// Serves a fixed catalog and cart; counts every mutating request.
    #[derive(Default)]
    struct StubApi {
        products: Vec<Product>,
        cart: CartSnapshot,
        fail_load: bool,
        fail_writes: bool,
        writes: AtomicUsize,
    }

    impl StubApi {
        fn with_line(quantity: u32) -> Self {
            let bed = product("p1", "bed", 100);
            let cart = CartSnapshot {
                carts: vec![CartItem {
                    id: CartItemId::new("c1"),
                    product: bed.clone(),
                    quantity,
                }],
                total: Price::from_units(100).times(quantity),
                final_total: Price::from_units(100).times(quantity),
            };
            Self {
                products: vec![bed, product("p2", "sofa", 250)],
                cart,
                ..Self::default()
            }
        }

        fn write(&self) -> Result<CartSnapshot, ApiError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(ApiError::Server {
                    status: 400,
                    message: "boom".to_string(),
                });
            }
            Ok(self.cart.clone())
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CartApi for StubApi {
        async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
            if self.fail_load {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            Ok(self.products.clone())
        }

        async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError> {
            Ok(self.cart.clone())
        }

        async fn add_item(&self, _: &ProductId, _: u32) -> Result<CartSnapshot, ApiError> {
            self.write()
        }

        async fn update_quantity(&self, _: &CartItemId, _: u32) -> Result<CartSnapshot, ApiError> {
            self.write()
        }

        async fn delete_item(&self, _: &CartItemId) -> Result<CartSnapshot, ApiError> {
            self.write()
        }

        async fn clear_cart(&self) -> Result<CartSnapshot, ApiError> {
            self.write()
        }

        async fn submit_order(&self, _: &OrderUser) -> Result<OrderConfirmation, ApiError> {
            self.write()?;
            Ok(OrderConfirmation::default())
        }
    }

    fn product(id: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            category: category.to_string(),
            price: Some(Price::from_units(price)),
            ..Product::default()
        }
    }

    async fn run_stub(
        api: &Arc<StubApi>,
        command: ShopCommand,
    ) -> (Result<(), ShopError>, String) {
        let notifier = Arc::new(TerminalNotifier::new(Vec::new()));
        let result = execute(Arc::clone(api), Arc::clone(&notifier), command).await;
        let notifier = Arc::try_unwrap(notifier).ok().unwrap();
        (result, String::from_utf8(notifier.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_decrement_at_one_changes_nothing() {
        let api = Arc::new(StubApi::with_line(1));

        let (result, output) = run_stub(
            &api,
            ShopCommand::Decrement {
                id: "c1".to_string(),
            },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(api.writes(), 0);
        assert!(output.starts_with("Nothing to change\n"));
        assert!(output.contains("Total: NT$100 (1 units)"));
    }

    #[tokio::test]
    async fn test_failed_add_is_not_applied() {
        let api = Arc::new(StubApi {
            fail_writes: true,
            ..StubApi::with_line(1)
        });

        let (result, output) = run_stub(
            &api,
            ShopCommand::Add {
                product_id: "p2".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(ShopError::NotApplied("add-click"))));
        assert_eq!(output, "✗ Failed to add to cart: boom\n");
    }

    #[tokio::test]
    async fn test_incomplete_order_is_rejected_without_request() {
        let api = Arc::new(StubApi::with_line(1));
        let user = OrderUser {
            name: "Ada".to_string(),
            ..OrderUser::default()
        };

        let (result, output) = run_stub(&api, ShopCommand::Order { user }).await;

        assert!(matches!(result, Err(ShopError::NotApplied("submit-click"))));
        assert_eq!(api.writes(), 0);
        assert_eq!(output, "✗ Order details incomplete\n");
    }

    #[tokio::test]
    async fn test_load_failure_stops_command() {
        let api = Arc::new(StubApi {
            fail_load: true,
            ..StubApi::with_line(1)
        });

        let (result, output) = run_stub(&api, ShopCommand::Clear).await;

        assert!(matches!(result, Err(ShopError::LoadFailed)));
        assert_eq!(api.writes(), 0);
        assert_eq!(output, "✗ Failed to initialize: connection refused\n");
    }

    #[tokio::test]
    async fn test_products_filtered_by_category() {
        let api = Arc::new(StubApi::with_line(1));

        let (result, output) = run_stub(
            &api,
            ShopCommand::Products {
                category: Some("sofa".to_string()),
            },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(output, "p2  [sofa]  Product p2  NT$250\n");
    }

    #[tokio::test]
    async fn test_increment_shows_cart() {
        let api = Arc::new(StubApi::with_line(2));

        let (result, output) = run_stub(
            &api,
            ShopCommand::Increment {
                id: "c1".to_string(),
            },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(api.writes(), 1);
        assert_eq!(
            output,
            "c1  Product p1 x2  NT$200\nTotal: NT$200 (2 units)\n"
        );
    }

    #[test]
    fn test_products_without_category_shows_all() {
        let command = ShopCommand::Products { category: None };
        assert_eq!(
            command.event(),
            Some(UiEvent::FilterChange {
                category: ALL_CATEGORIES.to_string()
            })
        );
    }

    #[test]
    fn test_step_commands() {
        let inc = ShopCommand::Increment {
            id: "c1".to_string(),
        };
        let dec = ShopCommand::Decrement {
            id: "c1".to_string(),
        };
        assert_eq!(
            inc.event(),
            Some(UiEvent::QuantityClick {
                id: CartItemId::new("c1"),
                delta: 1
            })
        );
        assert_eq!(
            dec.event(),
            Some(UiEvent::QuantityClick {
                id: CartItemId::new("c1"),
                delta: -1
            })
        );
    }

    #[test]
    fn test_cart_command_has_no_event() {
        assert_eq!(ShopCommand::Cart.event(), None);
    }

    #[test]
    fn test_order_submits() {
        let command = ShopCommand::Order {
            user: OrderUser::default(),
        };
        assert_eq!(command.event(), Some(UiEvent::SubmitClick));
    }
}
