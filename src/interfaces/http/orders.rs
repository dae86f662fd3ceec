use crate::application::shop::Shop;
use crate::domain::order::Order;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

pub async fn submit(
    State(shop): State<Arc<Shop>>,
    Path(username): Path<String>,
) -> Result<Json<Order>> {
    match shop.orders.submit(&username).await {
        Ok(order) => {
            tracing::info!(
                %username,
                order_id = %order.id(),
                total = %order.total(),
                "Order submitted"
            );
            Ok(Json(order))
        }
        Err(e) => {
            tracing::warn!(%username, error = %e, "Order submission failed");
            Err(e)
        }
    }
}

pub async fn history(
    State(shop): State<Arc<Shop>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(shop.orders.history(&username).await?))
}
