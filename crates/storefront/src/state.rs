//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::CatalogClient;
use crate::cart::CartStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart store is injected rather than
/// looked up globally, so tests can run each router against its own
/// isolated store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(catalog: CatalogClient, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog, cart }),
        }
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartCommand, MemoryCartStorage};
    use crate::config::CatalogConfig;

    fn test_state() -> AppState {
        let catalog = CatalogClient::new(&CatalogConfig {
            base_url: "http://localhost:4000/api".to_string(),
            timeout_secs: 10,
        });
        AppState::new(catalog, CartStore::open(MemoryCartStorage::new()))
    }

    #[test]
    fn test_clones_share_the_cart_store() {
        let state = test_state();
        let clone = state.clone();

        clone.cart().dispatch(CartCommand::ClearCart);
        state.cart().dispatch(CartCommand::TogglePopup);
        assert!(clone.cart().snapshot().is_popup_open);
    }
}
