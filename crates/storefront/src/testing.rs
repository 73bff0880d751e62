//! In-memory cart service for tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use hexcart_core::{
    CartItem, CartItemId, CartSnapshot, OrderConfirmation, OrderUser, Price, Product, ProductId,
};

use crate::api::{ApiError, CartApi};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchProducts,
    FetchCart,
    AddItem { product_id: String, quantity: u32 },
    UpdateQuantity { id: String, quantity: u32 },
    DeleteItem { id: String },
    ClearCart,
    SubmitOrder { user: OrderUser },
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    cart: CartSnapshot,
    calls: Vec<Call>,
    fail_next: Option<ApiError>,
    fail_next_cart_fetch: Option<ApiError>,
}

/// Records every call and answers from a scripted catalog and cart.
///
/// Every cart endpoint answers with the current scripted cart; tests swap it
/// with [`FakeApi::respond_cart_with`] to stand in for server-side changes.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new(products: Vec<Product>, cart: CartSnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                products,
                cart,
                ..FakeState::default()
            })),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn respond_cart_with(&self, cart: CartSnapshot) {
        self.lock().cart = cart;
    }

    /// Fail whichever call comes next.
    pub fn fail_next(&self, err: ApiError) {
        self.lock().fail_next = Some(err);
    }

    /// Fail the next cart fetch only.
    pub fn fail_next_cart_fetch(&self, err: ApiError) {
        self.lock().fail_next_cart_fetch = Some(err);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let mut state = self.lock();
        let is_cart_fetch = call == Call::FetchCart;
        state.calls.push(call);
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        if is_cart_fetch && let Some(err) = state.fail_next_cart_fetch.take() {
            return Err(err);
        }
        Ok(())
    }

    fn cart(&self, call: Call) -> Result<CartSnapshot, ApiError> {
        self.record(call)?;
        Ok(self.lock().cart.clone())
    }
}

#[async_trait]
impl CartApi for FakeApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(Call::FetchProducts)?;
        Ok(self.lock().products.clone())
    }

    async fn fetch_cart(&self) -> Result<CartSnapshot, ApiError> {
        self.cart(Call::FetchCart)
    }

    async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        self.cart(Call::AddItem {
            product_id: product_id.to_string(),
            quantity,
        })
    }

    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        self.cart(Call::UpdateQuantity {
            id: id.to_string(),
            quantity,
        })
    }

    async fn delete_item(&self, id: &CartItemId) -> Result<CartSnapshot, ApiError> {
        self.cart(Call::DeleteItem { id: id.to_string() })
    }

    async fn clear_cart(&self) -> Result<CartSnapshot, ApiError> {
        self.cart(Call::ClearCart)
    }

    async fn submit_order(&self, user: &OrderUser) -> Result<OrderConfirmation, ApiError> {
        self.record(Call::SubmitOrder { user: user.clone() })?;
        Ok(OrderConfirmation::default())
    }
}

/// Two products: `p1` in category "A" at 100, `p2` in "B" at 250.
pub fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("p1"),
            title: "Oak table".to_string(),
            category: "A".to_string(),
            price: Some(Price::from_units(100)),
            origin_price: Some(Price::from_units(150)),
            images: "https://img.example.com/p1.png".to_string(),
            description: String::new(),
        },
        Product {
            id: ProductId::new("p2"),
            title: "Linen sofa".to_string(),
            category: "B".to_string(),
            price: Some(Price::from_units(250)),
            origin_price: Some(Price::from_units(300)),
            images: "https://img.example.com/p2.png".to_string(),
            description: String::new(),
        },
    ]
}

/// A one-line cart whose final total is `quantity * price`.
pub fn cart_with(line_id: &str, product_id: &str, quantity: u32, price: i64) -> CartSnapshot {
    let product = catalog()
        .into_iter()
        .find(|product| product.id.as_str() == product_id)
        .unwrap_or_else(|| Product {
            id: ProductId::new(product_id),
            ..Product::default()
        });
    let product = Product {
        price: Some(Price::from_units(price)),
        ..product
    };
    let total = Price::from_units(price).times(quantity);

    CartSnapshot {
        carts: vec![CartItem {
            id: CartItemId::new(line_id),
            product,
            quantity,
        }],
        total,
        final_total: total,
    }
}
