//! HTTP route handlers for the shop page.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Shop page (loads catalog and cart)
//! GET  /health           - Health check
//! POST /filter           - Category select change
//!
//! # Cart
//! POST /cart/add         - Add one unit of a product
//! POST /cart/quantity    - Step a line's quantity by +1 or -1
//! POST /cart/delete      - Remove a line
//! POST /cart/clear       - Remove every line
//!
//! # Orders
//! POST /orders           - Submit the order form
//! ```
//!
//! Every page route answers with the full shop page.

pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(shop::add))
        .route("/quantity", post(shop::quantity))
        .route("/delete", post(shop::delete))
        .route("/clear", post(shop::clear))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/filter", post(shop::filter))
        .nest("/cart", cart_routes())
        .route("/orders", post(shop::submit_order))
}

/// Page routes plus health check and request IDs, bound to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the cart service.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::api::ApiError;
    use crate::middleware::REQUEST_ID_HEADER;
    use crate::testing::{Call, FakeApi, cart_with, catalog};

    fn state(api: &FakeApi) -> AppState {
        AppState::new(Arc::new(api.clone()))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_form(app: Router, uri: &str, form: &str) -> (StatusCode, String) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let (status, body) = get_page(app(state(&api)), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_index_renders_catalog_and_cart() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 2, 100));
        let (status, body) = get_page(app(state(&api)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Oak table"));
        assert!(body.contains("Linen sofa"));
        assert!(body.contains("<td class=\"totalPrice\">NT$200</td>"));
        assert!(body.contains("<option value=\"A\">A</option>"));
        assert!(!body.contains("role=\"alertdialog\""));
        assert_eq!(api.calls(), vec![Call::FetchProducts, Call::FetchCart]);
    }

    #[tokio::test]
    async fn test_index_failure_shows_init_dialog() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 2, 100));
        api.fail_next_cart_fetch(ApiError::Network("connection refused".to_string()));

        let (status, body) = get_page(app(state(&api)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("dialog-error"));
        assert!(body.contains("Failed to initialize"));
        assert!(body.contains("connection refused"));
        assert!(!body.contains("Oak table"));
    }

    #[tokio::test]
    async fn test_filter_selects_category() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p2", 1, 250));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        let (status, body) = post_form(app(state), "/filter", "category=B").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Linen sofa"));
        assert!(!body.contains("Oak table"));
        assert!(body.contains("<option value=\"B\" selected>B</option>"));
        // Filtering is local
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_add_shows_success_once() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        api.respond_cart_with(cart_with("c2", "p2", 1, 250));
        let (status, body) = post_form(app(state.clone()), "/cart/add", "product_id=p2").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("dialog-success"));
        assert!(body.contains("Added to cart"));
        assert!(body.contains("NT$250"));

        let (_, body) = post_form(app(state), "/filter", "category=all").await;
        assert!(!body.contains("Added to cart"));
    }

    #[tokio::test]
    async fn test_quantity_step_updates_cart() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 2, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        api.respond_cart_with(cart_with("c1", "p1", 1, 100));
        let (status, body) = post_form(app(state), "/cart/quantity", "id=c1&delta=-1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<td class=\"totalPrice\">NT$100</td>"));
        assert!(api.calls().contains(&Call::UpdateQuantity {
            id: "c1".to_string(),
            quantity: 1
        }));
    }

    #[tokio::test]
    async fn test_quantity_rejects_large_delta() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 2, 100));
        let (status, _) = post_form(app(state(&api)), "/cart/quantity", "id=c1&delta=5").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_shows_server_message() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        api.fail_next(ApiError::Server {
            status: 400,
            message: "cart item not found".to_string(),
        });
        let (_, body) = post_form(app(state), "/cart/delete", "id=c9").await;

        assert!(body.contains("Failed to delete item"));
        assert!(body.contains("cart item not found"));
        // Cart left as it was
        assert!(body.contains("<td class=\"totalPrice\">NT$100</td>"));
    }

    #[tokio::test]
    async fn test_clear_without_body() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        api.respond_cart_with(hexcart_core::CartSnapshot::default());
        let request = Request::post("/cart/clear").body(Body::empty()).unwrap();
        let (status, body) = send(app(state), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Cart cleared"));
        assert!(body.contains("<td class=\"totalPrice\">NT$0</td>"));
    }

    #[tokio::test]
    async fn test_incomplete_order_keeps_inputs() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        let (status, body) = post_form(
            app(state),
            "/orders",
            "name=Ada&tel=&email=ada%40example.com&address=Taipei&payment=ATM",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Order details incomplete"));
        assert!(body.contains("value=\"Ada\""));
        assert!(
            !api.calls()
                .iter()
                .any(|call| matches!(call, Call::SubmitOrder { .. }))
        );
    }

    #[tokio::test]
    async fn test_order_submission_clears_form_and_refreshes_cart() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let state = state(&api);
        get_page(app(state.clone()), "/").await;

        api.respond_cart_with(hexcart_core::CartSnapshot::default());
        let (status, body) = post_form(
            app(state),
            "/orders",
            "name=Ada&tel=0912345678&email=ada%40example.com&address=Taipei&payment=Credit+card",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Order submitted"));
        assert!(!body.contains("value=\"Ada\""));
        assert!(body.contains("<td class=\"totalPrice\">NT$0</td>"));
        assert_eq!(api.calls().last(), Some(&Call::FetchCart));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let api = FakeApi::new(catalog(), cart_with("c1", "p1", 1, 100));
        let request = Request::get("/health")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app(state(&api)).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "abc-123"
        );
    }
}
