use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A header row plus its data rows, fully materialized in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Splits raw rows into the header (first row) and the data rows.
    /// Returns `None` when there is no row at all.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let headers = rows.remove(0);
        Some(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One hop of a header path: `b[0]` is `{ key: "b", index: Some(0) }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: String,
    pub index: Option<usize>,
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
        }
    }

    pub fn indexed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: key.into(),
            index: Some(index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPath {
    pub header: String,
    pub segments: Vec<Segment>,
}

/// One output unit built from one data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.data)
    }
}

/// What a conversion hands back: the records, plus where they were written
/// when an output destination was configured.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutcome {
    pub records: Vec<Record>,
    pub output_path: Option<String>,
}
