//! Integration tests for the cart HTTP surface.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`,
//! so these only cover endpoints that operate on local cart state (the
//! catalog-backed endpoints need a live catalog API).

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use recyclebay_core::Price;
use recyclebay_integration_tests::{summary, test_state};
use recyclebay_storefront::cart::CartCommand;
use recyclebay_storefront::routes;
use recyclebay_storefront::state::AppState;

fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn cart_starts_empty() {
    let response = app(test_state()).oneshot(get("/cart")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalItems"], 0);
    assert_eq!(body["isPopupOpen"], false);
}

#[tokio::test]
async fn update_and_remove_flow_returns_fresh_snapshots() {
    let state = test_state();
    state
        .cart()
        .dispatch(CartCommand::AddItem(summary("p1", "Lamp", Price::parse("12.50"))));
    state
        .cart()
        .dispatch(CartCommand::AddItem(summary("p2", "Rug", Price::parse("30.00"))));
    let app = app(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/cart/update",
            &json!({"productId": "p1", "quantity": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalItems"], 4);

    let response = app
        .clone()
        .oneshot(post_json("/cart/remove", &json!({"productId": "p2"})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let response = app.oneshot(get("/cart/count")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn clearing_the_cart_keeps_the_wishlist() {
    let state = test_state();
    state
        .cart()
        .dispatch(CartCommand::AddItem(summary("p1", "Lamp", Price::parse("12.50"))));
    state
        .cart()
        .dispatch(CartCommand::AddToWishlist(summary("w1", "Desk", Price::parse("45.00"))));
    let app = app(state);

    let response = app
        .clone()
        .oneshot(post_json("/cart/clear", &json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["wishlist"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(post_json("/wishlist/clear", &json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["wishlist"], json!([]));
}

#[tokio::test]
async fn popup_endpoints_toggle_and_close() {
    let app = app(test_state());

    let response = app
        .clone()
        .oneshot(post_json("/cart/popup/toggle", &json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["isPopupOpen"], true);

    let response = app
        .oneshot(post_json("/cart/popup/close", &json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["isPopupOpen"], false);
}

#[tokio::test]
async fn checkout_with_an_empty_cart_redirects_back_to_the_cart() {
    let response = app(test_state())
        .oneshot(post_json(
            "/checkout",
            &json!({
                "customerInfo": {
                    "name": "Pat Doe",
                    "email": "pat@example.com",
                    "address": "1 Main St"
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/cart"
    );
}

#[tokio::test]
async fn failed_checkout_keeps_the_cart_intact() {
    // The catalog base URL points at a closed port, so order submission
    // fails upstream. The cart must not be cleared in that case.
    let state = test_state();
    state
        .cart()
        .dispatch(CartCommand::AddItem(summary("p1", "Lamp", Price::parse("12.50"))));
    let cart = state.cart().clone();
    let app = app(state);

    let response = app
        .oneshot(post_json(
            "/checkout",
            &json!({
                "customerInfo": {
                    "name": "Pat Doe",
                    "email": "pat@example.com",
                    "address": "1 Main St"
                }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(cart.snapshot().total_items, 1);
}
