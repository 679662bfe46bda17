use crate::domain::model::Record;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

pub const DEFAULT_INDENT: &str = "\t";

/// Serializes records as a JSON array, indented with `indent` when `pretty`.
pub fn render_json(records: &[Record], pretty: bool, indent: &str) -> Result<Vec<u8>> {
    if !pretty {
        return Ok(serde_json::to_vec(records)?);
    }

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}
