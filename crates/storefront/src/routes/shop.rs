//! Shop page handlers.
//!
//! Every handler turns its request into a [`UiEvent`], dispatches it to the
//! shared controller and answers with the whole page as it stands afterwards.
//! Whatever dialog the event left open is shown once and then dismissed.

use askama::Template;
use axum::{Form, extract::State, response::Html};
use hexcart_core::{CartItemId, OrderUser, ProductId};
use serde::Deserialize;
use tokio::sync::MutexGuard;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::event::{UiEvent, dispatch};
use crate::notify::Dialog;
use crate::state::{AppState, ShopController};
use crate::view::ALL_CATEGORIES;

/// Payment methods offered by the order form, first one preselected.
pub const PAYMENT_METHODS: [&str; 3] = ["ATM", "Credit card", "Convenience store"];

// =============================================================================
// Forms
// =============================================================================

/// Category select form data.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub category: String,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Quantity step form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub id: String,
    pub delta: i64,
}

/// Delete line form data.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub id: String,
}

/// Order form data. Missing inputs arrive as empty text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub name: String,
    pub tel: String,
    pub email: String,
    pub address: String,
    pub payment: String,
}

impl From<OrderForm> for OrderUser {
    fn from(form: OrderForm) -> Self {
        Self {
            name: form.name,
            tel: form.tel,
            email: form.email,
            address: form.address,
            payment: form.payment,
        }
    }
}

// =============================================================================
// Page Template
// =============================================================================

/// One `<option>` of a select.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Dialog display data for templates.
#[derive(Debug, Clone)]
pub struct DialogView {
    pub kind: &'static str,
    pub title: String,
    pub detail: String,
}

impl DialogView {
    /// The busy indicator never outlives a request, so it has no view.
    fn from_dialog(dialog: Dialog) -> Option<Self> {
        match dialog {
            Dialog::Busy => None,
            Dialog::Success { message } => Some(Self {
                kind: "success",
                title: message,
                detail: String::new(),
            }),
            Dialog::Error { title, detail } => Some(Self {
                kind: "error",
                title,
                detail: detail.unwrap_or_default(),
            }),
        }
    }
}

/// Full shop page.
#[derive(Template)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub all_categories: &'static str,
    pub all_selected: bool,
    pub categories: Vec<SelectOption>,
    pub product_grid: String,
    pub cart_body: String,
    pub total_display: String,
    pub order: OrderUser,
    pub payments: Vec<SelectOption>,
    pub dialog: Option<DialogView>,
}

impl ShopTemplate {
    /// Snapshot the controller's page together with the pending dialog.
    fn new(controller: &ShopController, dialog: Option<Dialog>) -> Self {
        let page = controller.page();
        let selected = page.selected_category.as_str();

        let categories = page
            .categories
            .iter()
            .map(|category| SelectOption {
                value: category.clone(),
                selected: category == selected,
            })
            .collect();

        let chosen_payment = PAYMENT_METHODS
            .iter()
            .find(|method| **method == page.order_form.payment)
            .or_else(|| PAYMENT_METHODS.first())
            .copied()
            .unwrap_or_default();
        let payments = PAYMENT_METHODS
            .iter()
            .map(|method| SelectOption {
                value: (*method).to_string(),
                selected: *method == chosen_payment,
            })
            .collect();

        Self {
            all_categories: ALL_CATEGORIES,
            all_selected: selected == ALL_CATEGORIES,
            categories,
            product_grid: page.product_grid.as_str().to_owned(),
            cart_body: page.cart_body.as_str().to_owned(),
            total_display: page.total_display.as_str().to_owned(),
            order: page.order_form.clone(),
            payments,
            dialog: dialog.and_then(DialogView::from_dialog),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Apply one event to the locked controller and render the resulting page.
///
/// The lock is held until the pending dialog has been taken, so a dialog is
/// always shown to the request that caused it.
async fn handle(
    mut controller: MutexGuard<'_, ShopController>,
    event: UiEvent,
) -> Result<Html<String>> {
    add_breadcrumb("page", event.name());

    let outcome = dispatch(&mut *controller, event).await;
    tracing::debug!(?outcome, "Page event handled");

    let dialog = controller.notifier().dismiss();
    let page = ShopTemplate::new(&controller, dialog);
    drop(controller);

    Ok(Html(page.render()?))
}

/// Open the shop page: fetch the catalog and cart and render both.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    handle(state.controller().await, UiEvent::Load).await
}

/// Change the category filter.
#[instrument(skip(state))]
pub async fn filter(
    State(state): State<AppState>,
    Form(form): Form<FilterForm>,
) -> Result<Html<String>> {
    handle(
        state.controller().await,
        UiEvent::FilterChange {
            category: form.category,
        },
    )
    .await
}

/// Add one unit of a product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Html<String>> {
    handle(
        state.controller().await,
        UiEvent::AddClick {
            product_id: ProductId::new(form.product_id),
        },
    )
    .await
}

/// Step a line's quantity up or down by one.
#[instrument(skip(state))]
pub async fn quantity(
    State(state): State<AppState>,
    Form(form): Form<QuantityForm>,
) -> Result<Html<String>> {
    if form.delta != 1 && form.delta != -1 {
        return Err(AppError::BadRequest(format!(
            "delta must be 1 or -1, got {}",
            form.delta
        )));
    }

    handle(
        state.controller().await,
        UiEvent::QuantityClick {
            id: CartItemId::new(form.id),
            delta: form.delta,
        },
    )
    .await
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Html<String>> {
    handle(
        state.controller().await,
        UiEvent::DeleteClick {
            id: CartItemId::new(form.id),
        },
    )
    .await
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Html<String>> {
    handle(state.controller().await, UiEvent::ClearClick).await
}

/// Store the typed order inputs on the page, then submit them.
#[instrument(skip(state, form))]
pub async fn submit_order(
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> Result<Html<String>> {
    let mut controller = state.controller().await;
    controller.page_mut().order_form = form.into();
    handle(controller, UiEvent::SubmitClick).await
}
