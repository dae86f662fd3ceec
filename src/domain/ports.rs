use super::account::Account;
use super::cart::Cart;
use super::ids::{AccountId, CartId, ItemId, OrderId};
use super::item::Item;
use super::order::Order;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn next_id(&self) -> Result<AccountId>;
    /// Inserts or updates an account.
    ///
    /// Fails with `UsernameTaken` when a different account already owns the
    /// username. The ownership check and the write happen atomically, so two
    /// concurrent saves can never both claim one username.
    async fn save(&self, account: Account) -> Result<Account>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn save(&self, item: Item) -> Result<Item>;
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>>;
    /// Every item, ordered by id.
    async fn find_all(&self) -> Result<Vec<Item>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn next_id(&self) -> Result<CartId>;
    async fn save(&self, cart: Cart) -> Result<Cart>;
    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn next_id(&self) -> Result<OrderId>;
    async fn save(&self, order: Order) -> Result<Order>;
    /// Orders of one account, in the order they were saved.
    async fn find_by_account(&self, account_id: AccountId) -> Result<Vec<Order>>;
}

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
}

pub type AccountStoreRef = Arc<dyn AccountStore>;
pub type CatalogStoreRef = Arc<dyn CatalogStore>;
pub type CartStoreRef = Arc<dyn CartStore>;
pub type OrderStoreRef = Arc<dyn OrderStore>;
pub type CredentialHasherRef = Arc<dyn CredentialHasher>;

/// The set of persistence adapters the application layer runs against.
#[derive(Clone)]
pub struct Stores {
    pub accounts: AccountStoreRef,
    pub catalog: CatalogStoreRef,
    pub carts: CartStoreRef,
    pub orders: OrderStoreRef,
}
