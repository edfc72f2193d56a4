//! Cart, wishlist, and checkout route handlers.
//!
//! Each handler dispatches one command to the injected [`CartStore`] and
//! returns the resulting snapshot, so clients always render from the
//! post-command state.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use recyclebay_core::ProductId;

use crate::api::types::{CheckoutRequest, CustomerInfo, Order, OrderItem, Product};
use crate::cart::{CartCommand, CartLine, CartSnapshot, ProductSummary};
use crate::error::Result;
use crate::state::AppState;

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.primary_image().map(ToString::to_string),
            price: product.price,
        }
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Add to cart / add to wishlist request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart / wishlist request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub product_id: ProductId,
}

/// Cart count response body.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Checkout request body: the customer details; the products and total
/// come from the server-side cart state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_info: CustomerInfo,
}

// =============================================================================
// Cart Handlers
// =============================================================================

/// Current cart snapshot.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().snapshot())
}

/// Add one unit of a product to the cart.
///
/// Fetches the catalog record so the line captures display metadata as of
/// add time.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartSnapshot>> {
    let product = state.catalog().get_product(&request.product_id).await?;
    let snapshot = state
        .cart()
        .dispatch(CartCommand::AddItem(ProductSummary::from(&product)));
    Ok(Json(snapshot))
}

/// Set a cart line's quantity exactly. Zero or less removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Json<CartSnapshot> {
    let snapshot = state.cart().dispatch(CartCommand::UpdateQuantity {
        id: request.product_id,
        quantity: request.quantity,
    });
    Json(snapshot)
}

/// Remove a line from the cart. Absent IDs are a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveRequest>,
) -> Json<CartSnapshot> {
    let snapshot = state
        .cart()
        .dispatch(CartCommand::RemoveItem(request.product_id));
    Json(snapshot)
}

/// Empty the cart, leaving the wishlist untouched.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().dispatch(CartCommand::ClearCart))
}

/// Unit count for the cart badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.cart().snapshot().total_items,
    })
}

/// Flip the mini-cart popup visibility.
#[instrument(skip(state))]
pub async fn popup_toggle(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().dispatch(CartCommand::TogglePopup))
}

/// Force the mini-cart popup closed. Idempotent.
#[instrument(skip(state))]
pub async fn popup_close(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().dispatch(CartCommand::ClosePopup))
}

// =============================================================================
// Wishlist Handlers
// =============================================================================

/// Current wishlist.
#[instrument(skip(state))]
pub async fn wishlist_show(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().snapshot())
}

/// Save a product for later. Already-saved products are left untouched.
#[instrument(skip(state))]
pub async fn wishlist_add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartSnapshot>> {
    let product = state.catalog().get_product(&request.product_id).await?;
    let snapshot = state
        .cart()
        .dispatch(CartCommand::AddToWishlist(ProductSummary::from(&product)));
    Ok(Json(snapshot))
}

/// Remove a saved product. Absent IDs are a no-op.
#[instrument(skip(state))]
pub async fn wishlist_remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveRequest>,
) -> Json<CartSnapshot> {
    let snapshot = state
        .cart()
        .dispatch(CartCommand::RemoveFromWishlist(request.product_id));
    Json(snapshot)
}

/// Empty the wishlist, leaving cart items untouched.
#[instrument(skip(state))]
pub async fn wishlist_clear(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().dispatch(CartCommand::ClearWishlist))
}

// =============================================================================
// Checkout
// =============================================================================

/// Submit the current cart as an order.
///
/// An empty cart is never submitted: the client is redirected back to the
/// cart page instead. On success the cart is cleared and the order
/// confirmation returned.
#[instrument(skip(state, form))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Response> {
    let snapshot = state.cart().snapshot();
    if snapshot.items.is_empty() {
        // Nothing to buy; send the client back to the cart page.
        return Ok(Redirect::to("/cart").into_response());
    }

    let request = CheckoutRequest {
        customer_info: form.customer_info,
        products: snapshot.items.iter().map(OrderItem::from).collect(),
        total_price: snapshot.total_price,
    };

    let order: Order = state.catalog().checkout(&request).await?;
    state.cart().dispatch(CartCommand::ClearCart);

    Ok(Json(order).into_response())
}
