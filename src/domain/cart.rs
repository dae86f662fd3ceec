use super::ids::{CartId, ItemId};
use super::item::Item;
use super::money::{Money, Quantity};
use crate::error::{Result, ShopError};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of entries one cart may hold.
///
/// Each unit is stored as its own entry, so this also bounds the memory a
/// single add can ask for.
pub const MAX_CART_ENTRIES: usize = 10_000;

/// A user's mutable shopping cart.
///
/// Quantity is represented by repeated entries: adding three units of an item
/// appends three copies of it. The running `total` always equals the sum of the
/// prices of the entries currently present. Entries and total are private so
/// that [`Cart::add`] and [`Cart::remove`] stay the only write path.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Cart {
    id: CartId,
    items: Vec<Item>,
    total: Money,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
            total: Money::ZERO,
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries for the given item.
    pub fn count_of(&self, item_id: ItemId) -> usize {
        self.items.iter().filter(|entry| entry.id == item_id).count()
    }

    /// Appends `quantity` copies of `item` and grows the total accordingly.
    ///
    /// Fails with `ValidationFailed`, leaving the cart untouched, when the
    /// cart would exceed [`MAX_CART_ENTRIES`] or the total would overflow.
    pub fn add(&mut self, item: &Item, quantity: Quantity) -> Result<()> {
        let count = quantity.get();
        if count > MAX_CART_ENTRIES.saturating_sub(self.items.len()) {
            return Err(ShopError::ValidationFailed(format!(
                "A cart holds at most {MAX_CART_ENTRIES} entries; it has {} and {count} were requested",
                self.items.len()
            )));
        }

        let total = item
            .price
            .times(count)
            .and_then(|cost| self.total.checked_add(cost))
            .ok_or_else(|| ShopError::ValidationFailed("Cart total overflows".to_string()))?;

        self.items.extend(std::iter::repeat_n(item, count).cloned());
        self.total = total;
        Ok(())
    }

    /// Removes up to `quantity` entries of `item_id`, earliest first.
    ///
    /// Returns how many entries were actually removed; asking for more than
    /// the cart holds is not an error.
    pub fn remove(&mut self, item_id: ItemId, quantity: Quantity) -> usize {
        let mut remaining = quantity.get();
        let mut removed = Money::ZERO;

        self.items.retain(|entry| {
            if remaining > 0 && entry.id == item_id {
                remaining -= 1;
                removed += Money::from(entry.price);
                false
            } else {
                true
            }
        });

        self.total -= removed;
        quantity.get() - remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Price;
    use rust_decimal_macros::dec;

    fn item(id: u64, price: rust_decimal::Decimal) -> Item {
        Item::new(id, format!("item {id}"), Price::new(price).unwrap())
    }

    fn qty(value: i64) -> Quantity {
        Quantity::new(value).unwrap()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new(CartId(1));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_add_appends_copies_and_grows_total() {
        let mut cart = Cart::new(CartId(1));
        cart.add(&item(1, dec!(1.00)), qty(2)).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::new(dec!(2.00)));

        cart.add(&item(2, dec!(10.00)), qty(1)).unwrap();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), Money::new(dec!(12.00)));
        assert_eq!(cart.count_of(ItemId(1)), 2);
    }

    #[test]
    fn test_remove_exact_quantity() {
        let mut cart = Cart::new(CartId(1));
        cart.add(&item(1, dec!(2.50)), qty(4)).unwrap();

        let removed = cart.remove(ItemId(1), qty(3));
        assert_eq!(removed, 3);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::new(dec!(2.50)));
    }

    #[test]
    fn test_remove_more_than_present() {
        let mut cart = Cart::new(CartId(1));
        cart.add(&item(1, dec!(1.00)), qty(1)).unwrap();
        cart.add(&item(2, dec!(10.00)), qty(2)).unwrap();

        let removed = cart.remove(ItemId(2), qty(5));
        assert_eq!(removed, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::new(dec!(1.00)));

        // Nothing left to remove: a no-op
        assert_eq!(cart.remove(ItemId(2), qty(1)), 0);
        assert_eq!(cart.total(), Money::new(dec!(1.00)));
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_entries() {
        let mut cart = Cart::new(CartId(1));
        cart.add(&item(1, dec!(1)), qty(1)).unwrap();
        cart.add(&item(2, dec!(2)), qty(1)).unwrap();
        cart.add(&item(1, dec!(1)), qty(1)).unwrap();
        cart.add(&item(3, dec!(3)), qty(1)).unwrap();

        cart.remove(ItemId(1), qty(1));
        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.value()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(cart.total(), Money::new(dec!(6)));
    }

    #[test]
    fn test_total_matches_sum_of_entries() {
        let mut cart = Cart::new(CartId(1));
        cart.add(&item(1, dec!(0.10)), qty(7)).unwrap();
        cart.add(&item(2, dec!(3.33)), qty(3)).unwrap();
        cart.remove(ItemId(1), qty(2));
        cart.remove(ItemId(2), qty(1));

        let sum = cart
            .items()
            .iter()
            .fold(Money::ZERO, |acc, entry| acc + Money::from(entry.price));
        assert_eq!(cart.total(), sum);
        assert_eq!(cart.total(), Money::new(dec!(7.16)));
    }

    #[test]
    fn test_add_beyond_entry_cap_is_rejected() {
        let mut cart = Cart::new(CartId(1));
        let widget = item(1, dec!(1.00));

        let huge = Quantity::new(i64::from(u32::MAX)).unwrap();
        assert!(matches!(
            cart.add(&widget, huge),
            Err(ShopError::ValidationFailed(_))
        ));
        assert!(cart.is_empty());

        cart.add(&widget, qty(MAX_CART_ENTRIES as i64 - 1)).unwrap();
        cart.add(&widget, qty(1)).unwrap();
        assert_eq!(cart.len(), MAX_CART_ENTRIES);
        assert!(cart.add(&widget, qty(1)).is_err());
        assert_eq!(cart.total(), Money::new(dec!(10000.00)));
    }

    #[test]
    fn test_add_overflowing_total_is_rejected() {
        let mut cart = Cart::new(CartId(1));
        let pricey = Item::new(1, "pricey", Price::new(rust_decimal::Decimal::MAX).unwrap());

        assert!(matches!(
            cart.add(&pricey, qty(2)),
            Err(ShopError::ValidationFailed(_))
        ));
        assert!(cart.is_empty());

        cart.add(&pricey, qty(1)).unwrap();
        assert!(cart.add(&pricey, qty(1)).is_err());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::new(rust_decimal::Decimal::MAX));
    }
}
