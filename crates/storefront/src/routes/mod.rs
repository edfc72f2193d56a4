//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check (in main)
//!
//! # Products
//! GET  /products               - Product listing (paged, filterable)
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Current cart snapshot
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Unit count only
//! POST /cart/popup/toggle      - Flip mini-cart popup visibility
//! POST /cart/popup/close       - Force mini-cart popup closed
//!
//! # Wishlist
//! GET  /wishlist               - Current wishlist
//! POST /wishlist/add           - Save a product for later
//! POST /wishlist/remove        - Remove a saved product
//! POST /wishlist/clear         - Empty the wishlist
//!
//! # Checkout
//! POST /checkout               - Submit the cart as an order
//!                                (empty cart redirects to /cart)
//!
//! # Donations
//! POST /donations              - Submit a donation
//! ```

pub mod cart;
pub mod donations;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/popup/toggle", post(cart::popup_toggle))
        .route("/popup/close", post(cart::popup_close))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::wishlist_show))
        .route("/add", post(cart::wishlist_add))
        .route("/remove", post(cart::wishlist_remove))
        .route("/clear", post(cart::wishlist_clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(cart::checkout))
        .route("/donations", post(donations::create))
}
