//! Input adapters for the delimited spreadsheet exports.

pub mod csv_read;

pub use csv_read::{SheetRow, read_rows};
