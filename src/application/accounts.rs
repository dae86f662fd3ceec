use crate::domain::account::{Account, NewAccount};
use crate::domain::cart::Cart;
use crate::domain::ids::AccountId;
use crate::domain::ports::{AccountStoreRef, CartStoreRef, CredentialHasherRef, Stores};
use crate::error::{Result, ShopError};

/// Registration and lookup of user accounts.
#[derive(Clone)]
pub struct AccountService {
    accounts: AccountStoreRef,
    carts: CartStoreRef,
    hasher: CredentialHasherRef,
}

impl AccountService {
    pub fn new(stores: &Stores, hasher: CredentialHasherRef) -> Self {
        Self {
            accounts: stores.accounts.clone(),
            carts: stores.carts.clone(),
            hasher,
        }
    }

    /// Registers a user together with an empty cart.
    ///
    /// The password is checked before anything is written and is stored only
    /// as a hash.
    pub async fn create_account(&self, request: NewAccount) -> Result<Account> {
        request.validate().map_err(ShopError::ValidationFailed)?;

        // Early rejection before paying for the hash. The store's save is what
        // actually guarantees uniqueness; losing that race leaves an unused
        // empty cart behind.
        if self
            .accounts
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(ShopError::UsernameTaken(request.username));
        }

        let hasher = self.hasher.clone();
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(ShopError::storage)??;

        let cart_id = self.carts.next_id().await?;
        let cart = self.carts.save(Cart::new(cart_id)).await?;

        let id = self.accounts.next_id().await?;
        let account = Account::new(id, request.username, password_hash, cart.id());
        self.accounts.save(account).await
    }

    pub async fn find_by_id(&self, id: AccountId) -> Result<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("User {id}")))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Account> {
        self.accounts
            .find_by_username(username)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("User '{username}'")))
    }
}
