//! rosterdelta-io: snapshot materialization
//!
//! Reads delimited snapshot files into [`Table`](rosterdelta_core::Table)s and
//! writes delta tables back out. Every field is kept as text; an empty field
//! is null.

pub mod csv_table;
pub mod errors;

pub use csv_table::{read_table, read_table_from_reader, write_table, write_table_to_writer, CsvOptions};
pub use errors::Result;
