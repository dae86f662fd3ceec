use crate::domain::account::Account;
use crate::domain::cart::Cart;
use crate::domain::ids::{AccountId, CartId, ItemId, OrderId};
use crate::domain::item::Item;
use crate::domain::order::Order;
use crate::domain::ports::{AccountStore, CartStore, CatalogStore, OrderStore, Stores};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for accounts, keyed by account id.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family mapping usernames to account ids.
pub const CF_USERNAMES: &str = "usernames";
/// Column Family for catalog items, keyed by item id.
pub const CF_ITEMS: &str = "items";
/// Column Family for carts, keyed by cart id.
pub const CF_CARTS: &str = "carts";
/// Column Family for orders, keyed by `account_id || order_id`.
pub const CF_ORDERS: &str = "orders";
/// Column Family holding the last id handed out per entity.
pub const CF_SEQUENCES: &str = "sequences";

const COLUMN_FAMILIES: [&str; 6] = [
    CF_ACCOUNTS,
    CF_USERNAMES,
    CF_ITEMS,
    CF_CARTS,
    CF_ORDERS,
    CF_SEQUENCES,
];

/// A persistent store implementation using RocksDB.
///
/// Implements every storage port on one database, with one Column Family per
/// entity. Values are JSON; keys are big-endian ids so iteration follows id
/// order. Orders are keyed by account first, which turns "history of one
/// account" into a prefix scan that yields orders in the order they were saved.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    sequence_lock: Arc<Mutex<()>>,
    account_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Missing column families are created on open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = COLUMN_FAMILIES
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            sequence_lock: Arc::new(Mutex::new(())),
            account_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Shares this database across all ports.
    pub fn into_stores(self) -> Stores {
        Stores {
            accounts: Arc::new(self.clone()),
            catalog: Arc::new(self.clone()),
            carts: Arc::new(self.clone()),
            orders: Arc::new(self),
        }
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            ShopError::storage(std::io::Error::other(format!(
                "Column family '{name}' not found"
            )))
        })
    }

    fn put_json<T: Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key, bytes)?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_pinned_cf(cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Decodes every value whose key starts with `prefix`, in key order.
    fn scan_json<T: DeserializeOwned>(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();

        for entry in self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward))
        {
            let (key, value) = entry?;
            if !key.starts_with(prefix) {
                break;
            }
            values.push(serde_json::from_slice(&value)?);
        }

        Ok(values)
    }

    /// Increments and returns the named counter.
    async fn next_sequence(&self, name: &str) -> Result<u64> {
        let _guard = self.sequence_lock.lock().await;
        let cf = self.cf(CF_SEQUENCES)?;

        let current = match self.db.get_pinned_cf(cf, name)? {
            Some(bytes) => {
                let raw = <[u8; 8]>::try_from(&*bytes).map_err(|_| {
                    ShopError::storage(std::io::Error::other(format!(
                        "Corrupted sequence '{name}'"
                    )))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };

        let next = current + 1;
        self.db.put_cf(cf, name, next.to_be_bytes())?;
        Ok(next)
    }
}

fn order_key(account_id: AccountId, order_id: OrderId) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&account_id.to_key());
    key[8..].copy_from_slice(&order_id.to_key());
    key
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn next_id(&self) -> Result<AccountId> {
        self.next_sequence(CF_ACCOUNTS).await.map(AccountId)
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let _guard = self.account_lock.lock().await;
        let accounts = self.cf(CF_ACCOUNTS)?;
        let usernames = self.cf(CF_USERNAMES)?;
        let key = account.id.to_key();

        if let Some(owner) = self.db.get_pinned_cf(usernames, account.username.as_bytes())?
            && *owner != key
        {
            return Err(ShopError::UsernameTaken(account.username));
        }

        // Record and index land together or not at all
        let mut batch = WriteBatch::default();
        let previous: Option<Account> = self.get_json(CF_ACCOUNTS, &key)?;
        if let Some(previous) = previous
            && previous.username != account.username
        {
            batch.delete_cf(usernames, previous.username.as_bytes());
        }
        batch.put_cf(accounts, key, serde_json::to_vec(&account)?);
        batch.put_cf(usernames, account.username.as_bytes(), key);
        self.db.write(&batch)?;
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        self.get_json(CF_ACCOUNTS, &id.to_key())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let usernames = self.cf(CF_USERNAMES)?;
        match self.db.get_pinned_cf(usernames, username.as_bytes())? {
            Some(id) => self.get_json(CF_ACCOUNTS, &id),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogStore for RocksDBStore {
    async fn save(&self, item: Item) -> Result<Item> {
        self.put_json(CF_ITEMS, &item.id.to_key(), &item)?;
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        self.get_json(CF_ITEMS, &id.to_key())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let items: Vec<Item> = self.scan_json(CF_ITEMS, &[])?;
        Ok(items.into_iter().filter(|item| item.name == name).collect())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        self.scan_json(CF_ITEMS, &[])
    }
}

#[async_trait]
impl CartStore for RocksDBStore {
    async fn next_id(&self) -> Result<CartId> {
        self.next_sequence(CF_CARTS).await.map(CartId)
    }

    async fn save(&self, cart: Cart) -> Result<Cart> {
        self.put_json(CF_CARTS, &cart.id().to_key(), &cart)?;
        Ok(cart)
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>> {
        self.get_json(CF_CARTS, &id.to_key())
    }
}

#[async_trait]
impl OrderStore for RocksDBStore {
    async fn next_id(&self) -> Result<OrderId> {
        self.next_sequence(CF_ORDERS).await.map(OrderId)
    }

    async fn save(&self, order: Order) -> Result<Order> {
        self.put_json(CF_ORDERS, &order_key(order.account_id(), order.id()), &order)?;
        Ok(order)
    }

    async fn find_by_account(&self, account_id: AccountId) -> Result<Vec<Order>> {
        self.scan_json(CF_ORDERS, &account_id.to_key())
    }
}
