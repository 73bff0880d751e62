//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::api::{CartApi, LiveJsClient};
use crate::config::ApiConfig;
use crate::controller::CartController;
use crate::notify::DialogNotifier;

/// Cart service handle shared by the controller.
pub type DynCartApi = Arc<dyn CartApi>;

/// The page controller as the host runs it.
pub type ShopController = CartController<DynCartApi, DialogNotifier>;

/// Application state shared across all handlers.
///
/// The host serves a single shop page, so there is exactly one controller.
/// Handlers take the lock for the whole event, which means page events are
/// applied one at a time in arrival order.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    controller: Mutex<ShopController>,
}

impl AppState {
    /// Create state around an existing cart service.
    #[must_use]
    pub fn new(api: DynCartApi) -> Self {
        let controller = CartController::new(api, Arc::new(DialogNotifier::new()));

        Self {
            inner: Arc::new(AppStateInner {
                controller: Mutex::new(controller),
            }),
        }
    }

    /// Create state talking to the remote cart service.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(Arc::new(LiveJsClient::new(config)))
    }

    /// Lock the page controller for one event.
    pub async fn controller(&self) -> MutexGuard<'_, ShopController> {
        self.inner.controller.lock().await
    }
}
