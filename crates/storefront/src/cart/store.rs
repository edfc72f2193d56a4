//! The cart store: state behind a lock, persistence glue, subscriptions.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;

use super::persistence::CartStorage;
use super::state::{CartSnapshot, CartState, PersistedCart};
use super::CartCommand;

/// Owns the cart state and the persistence/notification side effects.
///
/// Cheaply cloneable via `Arc`; inject it into whichever composition root
/// needs it rather than reaching for a global. Commands execute
/// synchronously to completion: the lock serializes mutations, the
/// snapshot is persisted best-effort, and subscribers observe the new
/// state before `dispatch` returns.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: RwLock<CartState>,
    storage: Box<dyn CartStorage>,
    watch: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Open a store backed by the given storage, rehydrating any snapshot
    /// left by a previous session.
    ///
    /// A missing or corrupt snapshot starts the cart empty; corruption is
    /// logged and never surfaced.
    #[must_use]
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        let state = storage.load().map_or_else(CartState::default, |text| {
            match serde_json::from_str::<PersistedCart>(&text) {
                Ok(persisted) => CartState::rehydrate(persisted),
                Err(e) => {
                    tracing::warn!(error = %e, "corrupt cart snapshot, starting empty");
                    CartState::default()
                }
            }
        });
        let (tx, _rx) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(CartStoreInner {
                state: RwLock::new(state),
                storage: Box::new(storage),
                watch: tx,
            }),
        }
    }

    /// Apply one command atomically, persist the result, and notify
    /// subscribers. Returns the new snapshot.
    pub fn dispatch(&self, command: CartCommand) -> CartSnapshot {
        let snapshot = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            state.apply(command);
            self.persist(&state);
            state.snapshot()
        };
        self.inner.watch.send_replace(snapshot.clone());
        snapshot
    }

    /// The current readable state with derived totals.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Subscribe to state changes. The receiver always holds the latest
    /// snapshot; any number of subscribers may read concurrently.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.watch.subscribe()
    }

    /// Serialize and write the durable portion of the state.
    ///
    /// Failures degrade to operating in-memory without durability.
    fn persist(&self, state: &CartState) {
        match serde_json::to_string(&state.to_persisted()) {
            Ok(text) => {
                if let Err(e) = self.inner.storage.save(&text) {
                    tracing::warn!(error = %e, "cart snapshot write failed, continuing in-memory");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cart snapshot serialization failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use recyclebay_core::{Price, ProductId};

    use super::super::persistence::MemoryCartStorage;
    use super::super::state::ProductSummary;
    use super::*;

    fn product(id: &str, price: &str) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            category: "tables".to_string(),
            image: None,
            price: Price::parse(price),
        }
    }

    #[test]
    fn test_dispatch_persists_every_mutation() {
        let storage = std::sync::Arc::new(MemoryCartStorage::new());
        let store = CartStore::open(std::sync::Arc::clone(&storage));

        store.dispatch(CartCommand::AddItem(product("a", "10")));
        let first = storage.stored().unwrap();
        assert!(first.contains("\"a\""));

        store.dispatch(CartCommand::ClearCart);
        let second = storage.stored().unwrap();
        assert!(!second.contains("\"a\""));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = std::sync::Arc::new(MemoryCartStorage::new());
        let first = CartStore::open(std::sync::Arc::clone(&storage));
        first.dispatch(CartCommand::AddItem(product("a", "10")));
        first.dispatch(CartCommand::UpdateQuantity {
            id: ProductId::new("a"),
            quantity: 3,
        });
        first.dispatch(CartCommand::AddToWishlist(product("w", "free")));

        let text = storage.stored().unwrap();
        let second = CartStore::open(MemoryCartStorage::with_snapshot(text));
        let snapshot = second.snapshot();
        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.items[0].quantity, 3);
        assert_eq!(snapshot.wishlist.len(), 1);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let store = CartStore::open(MemoryCartStorage::with_snapshot("not json {{{"));
        let snapshot = store.snapshot();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.wishlist.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let store = CartStore::open(MemoryCartStorage::failing());
        let snapshot = store.dispatch(CartCommand::AddItem(product("a", "10")));
        assert_eq!(snapshot.total_items, 1);
        // State survives further commands despite every save failing.
        let snapshot = store.dispatch(CartCommand::AddItem(product("a", "10")));
        assert_eq!(snapshot.total_items, 2);
    }

    #[test]
    fn test_popup_not_persisted() {
        let storage = std::sync::Arc::new(MemoryCartStorage::new());
        let store = CartStore::open(std::sync::Arc::clone(&storage));
        store.dispatch(CartCommand::TogglePopup);
        store.dispatch(CartCommand::AddItem(product("a", "1")));
        assert!(store.snapshot().is_popup_open);

        // Persisted layout carries only the durable collections.
        let text = storage.stored().unwrap();
        assert!(!text.contains("popup"));

        let reopened = CartStore::open(MemoryCartStorage::with_snapshot(text));
        assert!(!reopened.snapshot().is_popup_open);
        assert_eq!(reopened.snapshot().total_items, 1);
    }

    #[test]
    fn test_subscribers_see_latest_snapshot() {
        let store = CartStore::open(MemoryCartStorage::new());
        let rx = store.subscribe();
        assert_eq!(rx.borrow().total_items, 0);

        store.dispatch(CartCommand::AddItem(product("a", "10")));
        assert_eq!(rx.borrow().total_items, 1);

        let rx2 = store.subscribe();
        assert_eq!(rx2.borrow().total_items, 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::open(MemoryCartStorage::new());
        let clone = store.clone();
        clone.dispatch(CartCommand::AddItem(product("a", "10")));
        assert_eq!(store.snapshot().total_items, 1);
    }
}
