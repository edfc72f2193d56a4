//! Integration tests for RecycleBay.
//!
//! These tests exercise the storefront crates end to end without any
//! external services: the cart store runs against in-memory or temp-file
//! storage, and route tests drive the axum router in-process with
//! `tower::ServiceExt::oneshot`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p recyclebay-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart state machine and persistence behavior
//! - `cart_routes` - HTTP surface of the cart, wishlist, and checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use recyclebay_core::Price;
use recyclebay_storefront::api::CatalogClient;
use recyclebay_storefront::cart::{CartStore, MemoryCartStorage, ProductSummary};
use recyclebay_storefront::config::{CatalogConfig, StorefrontConfig};
use recyclebay_storefront::state::AppState;

/// A product summary line the way the add-to-cart path would build one.
#[must_use]
pub fn summary(id: &str, name: &str, price: Price) -> ProductSummary {
    ProductSummary {
        id: id.into(),
        name: name.to_string(),
        category: "chairs".to_string(),
        image: None,
        price,
    }
}

/// Configuration pointing at a catalog that is never contacted.
///
/// Route tests only hit endpoints that operate on local cart state, so
/// the base URL just has to be well formed.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        catalog: CatalogConfig {
            base_url: "http://127.0.0.1:1/api".to_string(),
            timeout_secs: 1,
        },
        cart_snapshot_path: PathBuf::from("unused.json"),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Application state backed by in-memory cart storage.
#[must_use]
pub fn test_state() -> AppState {
    let catalog = CatalogClient::new(&test_config().catalog);
    let cart = CartStore::open(MemoryCartStorage::new());
    AppState::new(catalog, cart)
}
