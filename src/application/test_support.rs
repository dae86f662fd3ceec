use super::shop::Shop;
use crate::domain::account::NewAccount;
use crate::domain::ids::ItemId;
use crate::domain::item::Item;
use crate::domain::money::Price;
use crate::domain::ports::{CredentialHasher, Stores};
use crate::error::Result;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Catalog item priced at 1.00.
pub const ROUND: ItemId = ItemId(1);
/// Catalog item priced at 10.00.
pub const SQUARE: ItemId = ItemId(2);

/// Reversible stand-in for the real hasher, so tests stay fast.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        Ok(format!("plain:{plaintext}"))
    }
}

pub struct TestShop {
    pub shop: Shop,
}

impl TestShop {
    /// An in-memory shop with the two widgets in its catalog and one user.
    pub async fn with_user(username: &str) -> Self {
        let shop = Shop::new(Stores::in_memory(), Arc::new(PlainHasher));
        shop.catalog
            .import(vec![
                Item::new(ROUND, "Round Widget", Price::new(dec!(1.00)).unwrap()),
                Item::new(SQUARE, "Square Widget", Price::new(dec!(10.00)).unwrap()),
            ])
            .await
            .unwrap();

        let fixture = Self { shop };
        fixture.register(username).await;
        fixture
    }

    pub async fn register(&self, username: &str) {
        self.shop
            .accounts
            .create_account(NewAccount {
                username: username.to_string(),
                password: "abcde".to_string(),
                confirm_password: "abcde".to_string(),
            })
            .await
            .unwrap();
    }
}
