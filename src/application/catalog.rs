use crate::domain::ids::ItemId;
use crate::domain::item::Item;
use crate::domain::ports::{CatalogStoreRef, Stores};
use crate::error::{Result, ShopError};

/// Read access to the item catalog, plus bulk loading.
#[derive(Clone)]
pub struct CatalogService {
    catalog: CatalogStoreRef,
}

impl CatalogService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            catalog: stores.catalog.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.catalog.find_all().await
    }

    pub async fn get(&self, id: ItemId) -> Result<Item> {
        self.catalog
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Item {id}")))
    }

    /// Items whose name matches exactly. No match is reported as `NotFound`.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let items = self.catalog.find_by_name(name).await?;
        if items.is_empty() {
            return Err(ShopError::NotFound(format!("Items named '{name}'")));
        }
        Ok(items)
    }

    /// Stores each item, replacing any existing item with the same id.
    pub async fn import<I>(&self, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = Item>,
    {
        let mut count = 0;
        for item in items {
            self.catalog.save(item).await?;
            count += 1;
        }
        Ok(count)
    }
}
