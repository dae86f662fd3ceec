use crate::application::shop::Shop;
use crate::domain::ids::ItemId;
use crate::domain::item::Item;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

pub async fn list(State(shop): State<Arc<Shop>>) -> Result<Json<Vec<Item>>> {
    Ok(Json(shop.catalog.list().await?))
}

pub async fn by_id(State(shop): State<Arc<Shop>>, Path(id): Path<u64>) -> Result<Json<Item>> {
    Ok(Json(shop.catalog.get(ItemId(id)).await?))
}

pub async fn by_name(
    State(shop): State<Arc<Shop>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Item>>> {
    Ok(Json(shop.catalog.search_by_name(&name).await?))
}
