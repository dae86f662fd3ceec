use crate::domain::account::Account;
use crate::domain::cart::Cart;
use crate::domain::ids::{AccountId, CartId, ItemId, OrderId};
use crate::domain::item::Item;
use crate::domain::order::Order;
use crate::domain::ports::{AccountStore, CartStore, CatalogStore, OrderStore, Stores};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Hands out ids starting at 1.
#[derive(Debug, Default)]
struct Sequence(AtomicU64);

impl Sequence {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Default)]
struct AccountTables {
    by_id: HashMap<AccountId, Account>,
    by_username: HashMap<String, AccountId>,
}

/// A thread-safe in-memory store for accounts.
///
/// Keeps a username index next to the id table so both lookups are O(1).
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    tables: Arc<RwLock<AccountTables>>,
    sequence: Arc<Sequence>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn next_id(&self) -> Result<AccountId> {
        Ok(AccountId(self.sequence.next()))
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let mut tables = self.tables.write().await;
        if let Some(owner) = tables.by_username.get(&account.username)
            && *owner != account.id
        {
            return Err(ShopError::UsernameTaken(account.username));
        }
        if let Some(previous) = tables.by_id.get(&account.id)
            && previous.username != account.username
        {
            let stale = previous.username.clone();
            tables.by_username.remove(&stale);
        }
        tables
            .by_username
            .insert(account.username.clone(), account.id);
        tables.by_id.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_username
            .get(username)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }
}

/// A thread-safe in-memory catalog, ordered by item id.
#[derive(Default, Clone)]
pub struct InMemoryCatalogStore {
    items: Arc<RwLock<BTreeMap<ItemId, Item>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn save(&self, item: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.name == name)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }
}

/// A thread-safe in-memory store for carts.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<CartId, Cart>>>,
    sequence: Arc<Sequence>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn next_id(&self) -> Result<CartId> {
        Ok(CartId(self.sequence.next()))
    }

    async fn save(&self, cart: Cart) -> Result<Cart> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.id(), cart.clone());
        Ok(cart)
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.get(&id).cloned())
    }
}

/// A thread-safe, append-only in-memory store for orders.
///
/// Orders are kept in a single vector, so per-account reads come back in
/// insertion order.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
    sequence: Arc<Sequence>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn next_id(&self) -> Result<OrderId> {
        Ok(OrderId(self.sequence.next()))
    }

    async fn save(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_account(&self, account_id: AccountId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|order| order.account_id() == account_id)
            .cloned()
            .collect())
    }
}

impl Stores {
    /// Fresh, empty in-memory adapters for every port.
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountStore::new()),
            catalog: Arc::new(InMemoryCatalogStore::new()),
            carts: Arc::new(InMemoryCartStore::new()),
            orders: Arc::new(InMemoryOrderStore::new()),
        }
    }
}
