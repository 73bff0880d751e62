//! Page events and their dispatch to controller operations.
//!
//! Hosts translate whatever their UI produces (form posts, CLI commands)
//! into a [`UiEvent`] and hand it to [`dispatch`]. Each event maps to exactly
//! one controller operation.

use hexcart_core::{CartItemId, ProductId};

use crate::api::CartApi;
use crate::controller::{CartController, Outcome};
use crate::notify::Notifier;

/// A user interaction with the shop page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The page was opened.
    Load,
    /// The category select changed.
    FilterChange { category: String },
    /// A product card's "add" control was used.
    AddClick { product_id: ProductId },
    /// A cart row's "+" (delta 1) or "-" (delta -1) control was used.
    QuantityClick { id: CartItemId, delta: i64 },
    /// A cart row's delete control was used.
    DeleteClick { id: CartItemId },
    /// The "discard all" control was used.
    ClearClick,
    /// The "submit order" control was used. Reads the page's order form.
    SubmitClick,
}

impl UiEvent {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::FilterChange { .. } => "filter-change",
            Self::AddClick { .. } => "add-click",
            Self::QuantityClick { .. } => "quantity-click",
            Self::DeleteClick { .. } => "delete-click",
            Self::ClearClick => "clear-click",
            Self::SubmitClick => "submit-click",
        }
    }
}

/// Route an event to its controller operation.
pub async fn dispatch<A, N>(controller: &mut CartController<A, N>, event: UiEvent) -> Outcome
where
    A: CartApi,
    N: Notifier + ?Sized,
{
    tracing::debug!(event = event.name(), "Dispatching page event");

    match event {
        UiEvent::Load => controller.load().await,
        UiEvent::FilterChange { category } => controller.filter(&category),
        UiEvent::AddClick { product_id } => controller.add_to_cart(&product_id).await,
        UiEvent::QuantityClick { id, delta } => controller.change_quantity(&id, delta).await,
        UiEvent::DeleteClick { id } => controller.delete_item(&id).await,
        UiEvent::ClearClick => controller.clear_cart().await,
        UiEvent::SubmitClick => controller.submit_order().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hexcart_core::OrderUser;

    use super::*;
    use crate::notify::DialogNotifier;
    use crate::testing::{Call, FakeApi, cart_with, catalog};

    #[tokio::test]
    async fn test_each_event_reaches_its_operation() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 2, 100));
        let mut controller = CartController::new(api.clone(), Arc::new(DialogNotifier::new()));

        dispatch(&mut controller, UiEvent::Load).await;
        dispatch(
            &mut controller,
            UiEvent::FilterChange {
                category: "B".to_string(),
            },
        )
        .await;
        dispatch(
            &mut controller,
            UiEvent::AddClick {
                product_id: ProductId::new("p2"),
            },
        )
        .await;
        dispatch(
            &mut controller,
            UiEvent::QuantityClick {
                id: CartItemId::new("c1"),
                delta: 1,
            },
        )
        .await;
        dispatch(
            &mut controller,
            UiEvent::DeleteClick {
                id: CartItemId::new("c1"),
            },
        )
        .await;
        dispatch(&mut controller, UiEvent::ClearClick).await;

        assert_eq!(controller.page().selected_category, "B");
        assert_eq!(
            api.calls(),
            vec![
                Call::FetchProducts,
                Call::FetchCart,
                Call::AddItem {
                    product_id: "p2".to_string(),
                    quantity: 1
                },
                Call::UpdateQuantity {
                    id: "c1".to_string(),
                    quantity: 3
                },
                Call::DeleteItem {
                    id: "c1".to_string()
                },
                Call::ClearCart,
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_reads_order_form() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let mut controller = CartController::new(api.clone(), Arc::new(DialogNotifier::new()));
        dispatch(&mut controller, UiEvent::Load).await;

        let user = OrderUser {
            name: "Ada".to_string(),
            tel: "0912".to_string(),
            email: "ada@example.com".to_string(),
            address: "Taipei".to_string(),
            payment: "ATM".to_string(),
        };
        controller.page_mut().order_form = user.clone();

        let outcome = dispatch(&mut controller, UiEvent::SubmitClick).await;

        assert_eq!(outcome, Outcome::Applied);
        assert!(api.calls().contains(&Call::SubmitOrder { user }));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(UiEvent::Load.name(), "load");
        assert_eq!(UiEvent::SubmitClick.name(), "submit-click");
    }
}
