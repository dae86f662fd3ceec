use crate::application::shop::Shop;
use crate::domain::cart::Cart;
use crate::domain::ids::ItemId;
use crate::error::Result;
use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

/// Body of both cart mutation routes.
///
/// `quantity` is signed so that zero and negative values reach the engine and
/// are rejected there as validation failures rather than as malformed JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: u64,
    pub quantity: i64,
}

pub async fn add(
    State(shop): State<Arc<Shop>>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>> {
    let cart = shop
        .carts
        .add_to_cart(&request.username, ItemId(request.item_id), request.quantity)
        .await?;
    tracing::info!(
        username = %request.username,
        item_id = request.item_id,
        quantity = request.quantity,
        total = %cart.total(),
        "Added to cart"
    );
    Ok(Json(cart))
}

pub async fn remove(
    State(shop): State<Arc<Shop>>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>> {
    let cart = shop
        .carts
        .remove_from_cart(&request.username, ItemId(request.item_id), request.quantity)
        .await?;
    tracing::info!(
        username = %request.username,
        item_id = request.item_id,
        quantity = request.quantity,
        total = %cart.total(),
        "Removed from cart"
    );
    Ok(Json(cart))
}
