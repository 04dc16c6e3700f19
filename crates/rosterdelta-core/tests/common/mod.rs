use rosterdelta_core::Table;

/// Build a table from string literals; an empty string is a null cell.
#[allow(dead_code)]
pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::with_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| {
                r.iter()
                    .map(|v| (!v.is_empty()).then(|| v.to_string()))
                    .collect()
            })
            .collect(),
    )
    .unwrap()
}

/// Values of `column` in row order (null as an empty string).
#[allow(dead_code)]
pub fn column(table: &Table, column: &str) -> Vec<String> {
    (0..table.len())
        .map(|row| table.value(row, column).unwrap_or_default().to_string())
        .collect()
}

/// Row `row` rendered as `|`-joined cells, for compact assertions.
#[allow(dead_code)]
pub fn row(table: &Table, row: usize) -> String {
    table.rows()[row]
        .values()
        .iter()
        .map(|v| v.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("|")
}

/// Header of an employee snapshot.
#[allow(dead_code)]
pub const EMPLOYEE_COLUMNS: &[&str] = &[
    "employee_number",
    "last_name",
    "first_name",
    "address",
    "labindicator",
];
