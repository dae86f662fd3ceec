use crate::application::shop::Shop;
use crate::domain::account::{Account, NewAccount};
use crate::domain::ids::{AccountId, CartId};
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

/// Public view of an account. The password hash is never sent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub username: String,
    pub cart_id: CartId,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            cart_id: account.cart_id,
        }
    }
}

pub async fn create(
    State(shop): State<Arc<Shop>>,
    Json(request): Json<NewAccount>,
) -> Result<Json<AccountView>> {
    let account = shop.accounts.create_account(request).await?;
    tracing::info!(account_id = %account.id, username = %account.username, "Account created");
    Ok(Json(account.into()))
}

pub async fn by_id(
    State(shop): State<Arc<Shop>>,
    Path(id): Path<u64>,
) -> Result<Json<AccountView>> {
    let account = shop.accounts.find_by_id(AccountId(id)).await?;
    Ok(Json(account.into()))
}

pub async fn by_username(
    State(shop): State<Arc<Shop>>,
    Path(username): Path<String>,
) -> Result<Json<AccountView>> {
    let account = shop.accounts.find_by_username(&username).await?;
    Ok(Json(account.into()))
}
