use super::ids::ItemId;
use super::money::Price;
use serde::{Deserialize, Serialize};

/// A purchasable catalog entry. Items are never mutated once created.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
