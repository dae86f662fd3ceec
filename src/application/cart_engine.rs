use super::locks::AccountLocks;
use super::lookup::{find_account, load_cart};
use crate::domain::cart::Cart;
use crate::domain::ids::ItemId;
use crate::domain::item::Item;
use crate::domain::money::Quantity;
use crate::domain::ports::{AccountStoreRef, CartStoreRef, CatalogStoreRef, Stores};
use crate::error::{Result, ShopError};

/// Adds and removes catalog items in a user's cart.
///
/// Every mutation is a read-modify-write of the whole cart, performed while
/// holding the owning account's lock so concurrent requests for the same
/// account cannot overwrite each other's changes.
#[derive(Clone)]
pub struct CartEngine {
    accounts: AccountStoreRef,
    catalog: CatalogStoreRef,
    carts: CartStoreRef,
    locks: AccountLocks,
}

impl CartEngine {
    pub fn new(stores: &Stores, locks: AccountLocks) -> Self {
        Self {
            accounts: stores.accounts.clone(),
            catalog: stores.catalog.clone(),
            carts: stores.carts.clone(),
            locks,
        }
    }

    /// Appends `quantity` units of the item to the user's cart.
    ///
    /// Fails with `NotFound` for an unknown user or item and with
    /// `ValidationFailed` when `quantity` is not positive.
    pub async fn add_to_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: i64,
    ) -> Result<Cart> {
        let account = find_account(&*self.accounts, username).await?;
        let item = self.find_item(item_id).await?;
        let quantity = Quantity::new(quantity)?;

        let _guard = self.locks.lock(account.id).await;
        let mut cart = load_cart(&*self.carts, &account).await?;
        cart.add(&item, quantity)?;
        self.carts.save(cart).await
    }

    /// Removes up to `quantity` units of the item from the user's cart.
    ///
    /// Removing more units than the cart holds empties that item's entries
    /// without error.
    pub async fn remove_from_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: i64,
    ) -> Result<Cart> {
        let account = find_account(&*self.accounts, username).await?;
        let item = self.find_item(item_id).await?;
        let quantity = Quantity::new(quantity)?;

        let _guard = self.locks.lock(account.id).await;
        let mut cart = load_cart(&*self.carts, &account).await?;
        cart.remove(item.id, quantity);
        self.carts.save(cart).await
    }

    /// Current contents of the user's cart.
    pub async fn cart(&self, username: &str) -> Result<Cart> {
        let account = find_account(&*self.accounts, username).await?;
        load_cart(&*self.carts, &account).await
    }

    async fn find_item(&self, item_id: ItemId) -> Result<Item> {
        self.catalog
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Item {item_id}")))
    }
}
