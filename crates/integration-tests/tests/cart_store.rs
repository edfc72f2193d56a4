//! Integration tests for the cart store and its persistence contract.
//!
//! These run entirely in-process: in-memory storage for command
//! semantics, temp-file storage for the across-session round trip.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;

use recyclebay_core::Price;
use recyclebay_integration_tests::summary;
use recyclebay_storefront::cart::{
    CartCommand, CartStore, FileCartStorage, MemoryCartStorage,
};

fn priced(id: &str, price: &str) -> recyclebay_storefront::cart::ProductSummary {
    summary(id, id, Price::parse(price))
}

// ============================================================================
// Derived Totals
// ============================================================================

#[test]
fn total_items_is_sum_of_quantities() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    store.dispatch(CartCommand::AddItem(priced("p2", "5.00")));
    let snapshot = store.dispatch(CartCommand::UpdateQuantity {
        id: "p2".into(),
        quantity: 4,
    });

    assert_eq!(snapshot.total_items, 6);
}

#[test]
fn total_price_sums_lines_and_treats_free_as_zero() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddItem(priced("lamp", "12.50")));
    store.dispatch(CartCommand::AddItem(priced("lamp", "12.50")));
    let snapshot = store.dispatch(CartCommand::AddItem(priced("pallet", "free")));

    assert_eq!(snapshot.total_price, Decimal::new(2500, 2));
}

#[test]
fn empty_cart_has_zero_totals() {
    let store = CartStore::open(MemoryCartStorage::new());
    let snapshot = store.snapshot();

    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_items, 0);
    assert_eq!(snapshot.total_price, Decimal::ZERO);
}

// ============================================================================
// Command Semantics
// ============================================================================

#[test]
fn repeated_add_merges_and_keeps_first_metadata() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddItem(summary(
        "sofa",
        "Green Sofa",
        Price::parse("80.00"),
    )));
    let snapshot = store.dispatch(CartCommand::AddItem(summary(
        "sofa",
        "Renamed Sofa",
        Price::parse("99.00"),
    )));

    assert_eq!(snapshot.items.len(), 1);
    let line = snapshot.items.first().unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.name, "Green Sofa");
    assert_eq!(line.price, Price::parse("80.00"));
}

#[test]
fn update_to_zero_or_negative_removes_the_line() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    store.dispatch(CartCommand::AddItem(priced("p2", "20.00")));

    let snapshot = store.dispatch(CartCommand::UpdateQuantity {
        id: "p1".into(),
        quantity: 0,
    });
    assert_eq!(snapshot.items.len(), 1);

    let snapshot = store.dispatch(CartCommand::UpdateQuantity {
        id: "p2".into(),
        quantity: -3,
    });
    assert!(snapshot.items.is_empty());
}

#[test]
fn remove_and_clear_leave_the_wishlist_alone() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    store.dispatch(CartCommand::AddToWishlist(priced("keeper", "5.00")));

    let snapshot = store.dispatch(CartCommand::RemoveItem("p1".into()));
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.wishlist.len(), 1);

    store.dispatch(CartCommand::AddItem(priced("p2", "10.00")));
    let snapshot = store.dispatch(CartCommand::ClearCart);
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.wishlist.len(), 1);
}

#[test]
fn wishlist_add_is_idempotent_per_product() {
    let store = CartStore::open(MemoryCartStorage::new());
    store.dispatch(CartCommand::AddToWishlist(summary(
        "desk",
        "Oak Desk",
        Price::parse("45.00"),
    )));
    let snapshot = store.dispatch(CartCommand::AddToWishlist(summary(
        "desk",
        "Different Desk",
        Price::parse("60.00"),
    )));

    assert_eq!(snapshot.wishlist.len(), 1);
    assert_eq!(snapshot.wishlist.first().unwrap().name, "Oak Desk");
}

#[test]
fn popup_toggles_and_close_is_idempotent() {
    let store = CartStore::open(MemoryCartStorage::new());
    assert!(!store.snapshot().is_popup_open);

    assert!(store.dispatch(CartCommand::TogglePopup).is_popup_open);
    assert!(!store.dispatch(CartCommand::TogglePopup).is_popup_open);

    store.dispatch(CartCommand::TogglePopup);
    assert!(!store.dispatch(CartCommand::ClosePopup).is_popup_open);
    assert!(!store.dispatch(CartCommand::ClosePopup).is_popup_open);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn cart_survives_a_restart_through_the_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");

    {
        let store = CartStore::open(FileCartStorage::new(&path));
        store.dispatch(CartCommand::AddItem(priced("sofa", "80.00")));
        store.dispatch(CartCommand::AddItem(priced("sofa", "80.00")));
        store.dispatch(CartCommand::AddItem(priced("lamp", "free")));
        store.dispatch(CartCommand::AddToWishlist(priced("desk", "45.00")));
        store.dispatch(CartCommand::TogglePopup);
    }

    let store = CartStore::open(FileCartStorage::new(&path));
    let snapshot = store.snapshot();

    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.total_items, 3);
    assert_eq!(snapshot.wishlist.len(), 1);
    assert_eq!(snapshot.total_price, Decimal::new(16000, 2));
    // Popup visibility is session-local, never restored.
    assert!(!snapshot.is_popup_open);
}

#[test]
fn corrupt_snapshot_falls_back_to_an_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = CartStore::open(FileCartStorage::new(&path));
    let snapshot = store.snapshot();

    assert!(snapshot.items.is_empty());
    assert!(snapshot.wishlist.is_empty());

    // The store still works and overwrites the bad file on the next write.
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    let store = CartStore::open(FileCartStorage::new(&path));
    assert_eq!(store.snapshot().items.len(), 1);
}

#[test]
fn failing_storage_degrades_to_in_memory_operation() {
    let storage = Arc::new(MemoryCartStorage::failing());
    let store = CartStore::open(Arc::clone(&storage));

    let snapshot = store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    assert_eq!(snapshot.items.len(), 1);
    assert!(storage.stored().is_none());
}

#[test]
fn subscribers_observe_every_dispatched_snapshot() {
    let store = CartStore::open(MemoryCartStorage::new());
    let receiver = store.subscribe();

    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));
    store.dispatch(CartCommand::AddItem(priced("p1", "10.00")));

    assert_eq!(receiver.borrow().total_items, 2);
}
