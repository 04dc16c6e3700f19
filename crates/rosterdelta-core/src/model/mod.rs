pub mod table;

pub use table::{Record, Table, TableRole};
