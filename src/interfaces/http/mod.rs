//! JSON-over-HTTP adapter.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness
//!
//! # Users
//! POST /api/user/create               - Register (username, password, confirmPassword)
//! GET  /api/user/id/{id}              - Account by id
//! GET  /api/user/{username}           - Account by username
//!
//! # Items
//! GET  /api/item                      - Whole catalog
//! GET  /api/item/{id}                 - Item by id
//! GET  /api/item/name/{name}          - Items by exact name
//!
//! # Cart
//! POST /api/cart/addToCart            - Add (username, itemId, quantity)
//! POST /api/cart/removeFromCart       - Remove (same body)
//!
//! # Orders
//! POST /api/order/submit/{username}   - Snapshot the cart into an order
//! GET  /api/order/history/{username}  - Orders of one user
//! ```

pub mod cart;
pub mod error;
pub mod items;
pub mod orders;
pub mod users;

use crate::application::shop::Shop;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

async fn health() -> &'static str {
    "ok"
}

/// Builds the full application router around a shared [`Shop`].
pub fn router(shop: Arc<Shop>) -> Router {
    Router::new()
        .route("/health", get(health))
        // Users
        .route("/api/user/create", post(users::create))
        .route("/api/user/id/{id}", get(users::by_id))
        .route("/api/user/{username}", get(users::by_username))
        // Items
        .route("/api/item", get(items::list))
        .route("/api/item/{id}", get(items::by_id))
        .route("/api/item/name/{name}", get(items::by_name))
        // Cart
        .route("/api/cart/addToCart", post(cart::add))
        .route("/api/cart/removeFromCart", post(cart::remove))
        // Orders
        .route("/api/order/submit/{username}", post(orders::submit))
        .route("/api/order/history/{username}", get(orders::history))
        .layer(TraceLayer::new_for_http())
        .with_state(shop)
}
