use super::cart::Cart;
use super::ids::{AccountId, OrderId};
use super::item::Item;
use super::money::Money;
use serde::{Deserialize, Serialize};

/// An immutable record of a cart's contents at submission time.
///
/// The order owns a copy of the entries, so later changes to the live cart
/// never reach it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Order {
    id: OrderId,
    account_id: AccountId,
    items: Vec<Item>,
    total: Money,
}

impl Order {
    /// Snapshots `cart` into a new order owned by `account_id`.
    pub fn from_cart(id: OrderId, account_id: AccountId, cart: &Cart) -> Self {
        Self {
            id,
            account_id,
            items: cart.items().to_vec(),
            total: cart.total(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }
}
