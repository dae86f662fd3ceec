use crate::domain::item::Item;
use crate::error::{Result, ShopError};
use std::io::Read;

/// Reads catalog items from a CSV source with an `id, name, price, description`
/// header.
///
/// Fields are trimmed and the description column may be omitted. Each row is
/// deserialized lazily, so one bad row does not stop the rest.
pub struct ItemReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ItemReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn items(self) -> impl Iterator<Item = Result<Item>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ShopError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ItemId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, name, price, description\n\
                    1, Round Widget, 2.99, A widget that is round\n\
                    2, Square Widget, 1.99";
        let items: Vec<Result<Item>> = ItemReader::new(data.as_bytes()).items().collect();

        assert_eq!(items.len(), 2);
        let round = items[0].as_ref().unwrap();
        assert_eq!(round.id, ItemId(1));
        assert_eq!(round.name, "Round Widget");
        assert_eq!(round.price.value(), dec!(2.99));
        assert_eq!(round.description, "A widget that is round");

        let square = items[1].as_ref().unwrap();
        assert_eq!(square.description, "");
    }

    #[test]
    fn test_reader_malformed_rows() {
        let data = "id, name, price, description\n\
                    x, Bad Id, 1.00, \n\
                    3, Negative, -1.00, \n\
                    4, Fine, 4.00, ";
        let items: Vec<Result<Item>> = ItemReader::new(data.as_bytes()).items().collect();

        assert!(matches!(items[0], Err(ShopError::Csv(_))));
        assert!(items[1].is_err());
        assert_eq!(items[2].as_ref().unwrap().id, ItemId(4));
    }
}
