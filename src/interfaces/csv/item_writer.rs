use crate::domain::item::Item;
use crate::error::Result;
use std::io::Write;

/// Writes catalog items as CSV, header first.
pub struct ItemWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ItemWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_items<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Item>,
    {
        for item in items {
            self.writer.serialize(item)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Price;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_output() {
        let items = vec![
            Item::new(1, "Round Widget", Price::new(dec!(2.99)).unwrap())
                .with_description("A widget that is round"),
            Item::new(2, "Square Widget", Price::new(dec!(1.99)).unwrap()),
        ];

        let mut buffer = Vec::new();
        ItemWriter::new(&mut buffer).write_items(items).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "id,name,price,description\n\
             1,Round Widget,2.99,A widget that is round\n\
             2,Square Widget,1.99,\n"
        );
    }
}
