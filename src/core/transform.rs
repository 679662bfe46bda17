use crate::core::builder::place;
use crate::core::path::parse_headers;
use crate::domain::model::{Record, Table};
use crate::utils::error::{ConvertError, Result};

/// Converts every data row of `table` into one nested record.
///
/// Headers are parsed once, before any row. The conversion is all-or-nothing:
/// the first malformed header, ragged row or path-type conflict is returned
/// and no records are produced.
pub fn transform(table: &Table) -> Result<Vec<Record>> {
    let paths = parse_headers(&table.headers)?;
    let expected = paths.len();

    let mut records = Vec::with_capacity(table.rows.len());
    for (row_index, row) in table.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(ConvertError::RowLength {
                row: row_index + 1,
                expected,
                found: row.len(),
            });
        }

        let mut record = Record::new();
        for (path, field) in paths.iter().zip(row) {
            place(&mut record.data, path, field)?;
        }
        records.push(record);
    }

    Ok(records)
}

/// Same as [`transform`], for raw rows whose first row is the header.
pub fn transform_rows(rows: &[Vec<String>]) -> Result<Vec<Record>> {
    let (headers, data) = rows.split_first().ok_or(ConvertError::EmptyInput)?;
    transform(&Table::new(headers.clone(), data.to_vec()))
}
