use super::accounts::AccountService;
use super::cart_engine::CartEngine;
use super::catalog::CatalogService;
use super::locks::AccountLocks;
use super::order_engine::OrderEngine;
use crate::domain::ports::{CredentialHasherRef, Stores};

/// All application services wired against one set of stores.
///
/// The cart and order engines share a single lock registry, so a submission
/// never observes a cart halfway through an update.
#[derive(Clone)]
pub struct Shop {
    pub accounts: AccountService,
    pub catalog: CatalogService,
    pub carts: CartEngine,
    pub orders: OrderEngine,
}

impl Shop {
    pub fn new(stores: Stores, hasher: CredentialHasherRef) -> Self {
        let locks = AccountLocks::new();
        Self {
            accounts: AccountService::new(&stores, hasher),
            catalog: CatalogService::new(&stores),
            carts: CartEngine::new(&stores, locks.clone()),
            orders: OrderEngine::new(&stores, locks),
        }
    }
}
