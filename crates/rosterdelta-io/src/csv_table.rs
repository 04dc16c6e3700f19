//! Delimited snapshot reader and writer.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, WriterBuilder};
use rosterdelta_core::{log_op_end, log_op_error, log_op_start, Table, TableRole};
use serde::{Deserialize, Serialize};

use crate::errors::{from_model, input_read, invalid_delimiter, output_write, Result};

/// Field delimiter used by the snapshot extracts.
pub const DEFAULT_DELIMITER: char = '|';

/// Options for the `[csv]` settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// The delimiter as the single byte the csv crate expects.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the delimiter is not ASCII.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(invalid_delimiter(self.delimiter))
        }
    }
}

/// Read a snapshot file into a [`Table`].
///
/// The first line is the header. Every field is kept verbatim as text, so
/// keys like `0042` keep their leading zeros; an empty field becomes null.
///
/// # Errors
///
/// - `InputRead` when the file cannot be opened, a row is ragged, a field is
///   not valid UTF-8 or the header row is missing
/// - `InvalidInput` when the header repeats a column name
pub fn read_table(path: &Path, options: &CsvOptions, role: TableRole) -> Result<Table> {
    let started = Instant::now();
    let path_display = path.display().to_string();
    log_op_start!("read_table", table = %role, path = path_display.as_str());

    let result = File::open(path)
        .map_err(|e| input_read(path, e))
        .and_then(|file| read_table_from_reader(file, path, options))
        .map_err(|e| e.with_table(role));

    match result {
        Ok(table) => {
            log_op_end!(
                "read_table",
                duration_ms = started.elapsed().as_millis() as u64,
                table = %role,
                rows = table.len()
            );
            Ok(table)
        }
        Err(err) => {
            log_op_error!(
                "read_table",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Read a snapshot from any byte source; `origin` names it in errors.
///
/// # Errors
///
/// See [`read_table`].
pub fn read_table_from_reader<R: Read>(
    source: R,
    origin: &Path,
    options: &CsvOptions,
) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| input_read(origin, e))?.clone();
    if headers.is_empty() {
        return Err(input_read(origin, "missing header row"));
    }

    let columns = headers.iter().map(str::to_string).collect();
    let mut table = Table::new(columns).map_err(|e| from_model(origin, e))?;

    for result in reader.records() {
        let record = result.map_err(|e| input_read(origin, e))?;
        let values = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        table.push_row(values).map_err(|e| from_model(origin, e))?;
    }

    Ok(table)
}

/// Write a table with its header row; null cells become empty fields.
///
/// # Errors
///
/// `OutputWrite` when the file cannot be created or written.
pub fn write_table(path: &Path, table: &Table, options: &CsvOptions) -> Result<()> {
    let started = Instant::now();
    let path_display = path.display().to_string();
    log_op_start!("write_table", path = path_display.as_str(), rows = table.len());

    let result = File::create(path)
        .map_err(|e| output_write(path, e))
        .and_then(|file| write_table_to_writer(file, path, table, options));

    match result {
        Ok(()) => {
            log_op_end!(
                "write_table",
                duration_ms = started.elapsed().as_millis() as u64
            );
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                "write_table",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Write a table to any byte sink; `target` names it in errors.
///
/// # Errors
///
/// See [`write_table`].
pub fn write_table_to_writer<W: Write>(
    sink: W,
    target: &Path,
    table: &Table,
    options: &CsvOptions,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .from_writer(sink);

    writer
        .write_record(table.columns())
        .map_err(|e| output_write(target, e))?;
    for record in table.rows() {
        writer
            .write_record(record.values().iter().map(|v| v.as_deref().unwrap_or("")))
            .map_err(|e| output_write(target, e))?;
    }
    writer.flush().map_err(|e| output_write(target, e))
}
