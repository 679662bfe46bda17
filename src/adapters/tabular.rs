use crate::domain::model::Table;
use crate::utils::error::{ConvertError, Result};
use csv::ReaderBuilder;

/// Decodes CSV bytes into a [`Table`]; the first record is the header row.
///
/// The reader is flexible so ragged rows reach the converter, which reports
/// them as structural errors with the offending row number.
pub fn read_table(data: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    tracing::debug!("Decoded {} CSV rows (including header)", rows.len());
    Table::from_rows(rows).ok_or(ConvertError::EmptyInput)
}
