use crate::domain::account::Account;
use crate::domain::cart::Cart;
use crate::domain::ports::{AccountStore, CartStore};
use crate::error::{Result, ShopError};

/// Resolves a username, mapping a miss to `NotFound`.
pub(crate) async fn find_account(accounts: &dyn AccountStore, username: &str) -> Result<Account> {
    accounts
        .find_by_username(username)
        .await?
        .ok_or_else(|| ShopError::NotFound(format!("User '{username}'")))
}

/// Loads the cart owned by `account`.
///
/// Every account is created with its cart, so a miss means the store is
/// inconsistent and is reported as a storage failure.
pub(crate) async fn load_cart(carts: &dyn CartStore, account: &Account) -> Result<Cart> {
    carts.find_by_id(account.cart_id).await?.ok_or_else(|| {
        ShopError::storage(std::io::Error::other(format!(
            "Cart {} of user '{}' is missing",
            account.cart_id, account.username
        )))
    })
}
