//! Catalog import and export in CSV form (`id, name, price, description`).

pub mod item_reader;
pub mod item_writer;
