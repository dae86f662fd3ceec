use super::locks::AccountLocks;
use super::lookup::{find_account, load_cart};
use crate::domain::order::Order;
use crate::domain::ports::{AccountStoreRef, CartStoreRef, OrderStoreRef, Stores};
use crate::error::Result;

/// Turns carts into orders and reads order history.
#[derive(Clone)]
pub struct OrderEngine {
    accounts: AccountStoreRef,
    carts: CartStoreRef,
    orders: OrderStoreRef,
    locks: AccountLocks,
}

impl OrderEngine {
    pub fn new(stores: &Stores, locks: AccountLocks) -> Self {
        Self {
            accounts: stores.accounts.clone(),
            carts: stores.carts.clone(),
            orders: stores.orders.clone(),
            locks,
        }
    }

    /// Records the user's current cart as a new order.
    ///
    /// The order copies the cart's entries and total. The cart itself is left
    /// as it is, so submitting an unchanged cart twice produces two identical
    /// orders.
    pub async fn submit(&self, username: &str) -> Result<Order> {
        let account = find_account(&*self.accounts, username).await?;

        let _guard = self.locks.lock(account.id).await;
        let cart = load_cart(&*self.carts, &account).await?;
        let id = self.orders.next_id().await?;
        self.orders.save(Order::from_cart(id, account.id, &cart)).await
    }

    /// Every order submitted by the user, oldest first.
    pub async fn history(&self, username: &str) -> Result<Vec<Order>> {
        let account = find_account(&*self.accounts, username).await?;
        self.orders.find_by_account(account.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{ROUND, SQUARE, TestShop};
    use crate::domain::account::Account;
    use crate::domain::cart::Cart;
    use crate::domain::ids::{AccountId, CartId, OrderId};
    use crate::domain::money::Money;
    use crate::domain::ports::{AccountStore, MockCartStore, MockOrderStore};
    use crate::error::ShopError;
    use crate::infrastructure::in_memory::InMemoryAccountStore;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_submit_snapshots_cart() {
        let fixture = TestShop::with_user("maggie").await;
        let carts = &fixture.shop.carts;
        let orders = &fixture.shop.orders;

        carts.add_to_cart("maggie", ROUND, 2).await.unwrap();
        carts.add_to_cart("maggie", SQUARE, 1).await.unwrap();

        let order = orders.submit("maggie").await.unwrap();
        assert_eq!(order.items().len(), 3);
        assert_eq!(order.total(), Money::new(dec!(12.00)));

        // Later cart changes do not reach the stored order
        carts.remove_from_cart("maggie", ROUND, 2).await.unwrap();
        carts.add_to_cart("maggie", SQUARE, 4).await.unwrap();

        let history = orders.history("maggie").await.unwrap();
        assert_eq!(history, vec![order]);
    }

    #[tokio::test]
    async fn test_submit_leaves_cart_untouched() {
        let fixture = TestShop::with_user("maggie").await;
        fixture
            .shop
            .carts
            .add_to_cart("maggie", ROUND, 1)
            .await
            .unwrap();

        let first = fixture.shop.orders.submit("maggie").await.unwrap();
        let second = fixture.shop.orders.submit("maggie").await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.items(), second.items());
        assert_eq!(fixture.shop.carts.cart("maggie").await.unwrap().len(), 1);
        assert_eq!(fixture.shop.orders.history("maggie").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_empty_cart() {
        let fixture = TestShop::with_user("maggie").await;
        let order = fixture.shop.orders.submit("maggie").await.unwrap();
        assert!(order.items().is_empty());
        assert_eq!(order.total(), Money::ZERO);
    }

    #[tokio::test]
    async fn test_history_is_per_account_and_in_submission_order() {
        let fixture = TestShop::with_user("maggie").await;
        fixture.register("elliot").await;
        let carts = &fixture.shop.carts;
        let orders = &fixture.shop.orders;

        carts.add_to_cart("maggie", ROUND, 1).await.unwrap();
        let m1 = orders.submit("maggie").await.unwrap();
        carts.add_to_cart("elliot", SQUARE, 1).await.unwrap();
        let e1 = orders.submit("elliot").await.unwrap();
        carts.add_to_cart("maggie", SQUARE, 1).await.unwrap();
        let m2 = orders.submit("maggie").await.unwrap();

        assert_eq!(orders.history("maggie").await.unwrap(), vec![m1, m2]);
        assert_eq!(orders.history("elliot").await.unwrap(), vec![e1]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let fixture = TestShop::with_user("maggie").await;
        let orders = &fixture.shop.orders;

        assert!(matches!(
            orders.submit("ghost").await,
            Err(ShopError::NotFound(_))
        ));
        assert!(matches!(
            orders.history("ghost").await,
            Err(ShopError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let accounts = InMemoryAccountStore::new();
        let account = Account::new(AccountId(1), "maggie", "hash", CartId(1));
        accounts.save(account).await.unwrap();

        let mut carts = MockCartStore::new();
        carts
            .expect_find_by_id()
            .returning(|id| Ok(Some(Cart::new(id))));

        let mut orders = MockOrderStore::new();
        orders.expect_next_id().returning(|| Ok(OrderId(1)));
        orders
            .expect_save()
            .returning(|_| Err(ShopError::storage(std::io::Error::other("disk full"))));

        let mut stores = Stores::in_memory();
        stores.accounts = Arc::new(accounts);
        stores.carts = Arc::new(carts);
        stores.orders = Arc::new(orders);

        let engine = OrderEngine::new(&stores, AccountLocks::new());
        let result = engine.submit("maggie").await;
        assert!(matches!(result, Err(ShopError::StorageFailure(_))));
    }
}
