//! Dataset input.
//!
//! Loads rows for the viewer from a JSON array file (`.json`) or from JSONL,
//! one object per line. Column order is the order in which fields first
//! appear.

use crate::model::error::InputError;
use crate::model::{CellValue, ColumnId, ColumnSpec, Row, RowDataset};
use serde_json::{Map, Value};
use std::io::BufRead;
use std::path::Path;

/// Rows plus the fields they contain, in first-seen order.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Field names in first-seen order.
    pub fields: Vec<String>,
    /// The loaded rows.
    pub rows: RowDataset,
}

impl LoadedDataset {
    fn from_objects(objects: Vec<Map<String, Value>>) -> Self {
        let mut fields: Vec<String> = Vec::new();
        let rows = objects
            .into_iter()
            .map(|object| {
                for key in object.keys() {
                    if !fields.iter().any(|f| f == key) {
                        fields.push(key.clone());
                    }
                }
                object
                    .into_iter()
                    .map(|(k, v)| (k, CellValue::from(v)))
                    .collect::<Row>()
            })
            .collect();
        Self { fields, rows }
    }

    /// One default column per field. Fields that are not valid ids are skipped.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        self.fields
            .iter()
            .filter_map(|f| ColumnId::new(f.as_str()).ok())
            .map(ColumnSpec::new)
            .collect()
    }
}

/// Load a dataset file.
///
/// # Errors
///
/// - [`InputError::FileNotFound`] if `path` does not exist
/// - [`InputError::InvalidJson`] / [`InputError::NotAnObject`] for bad rows
/// - [`InputError::Io`] for read failures
pub fn load_dataset(path: &Path) -> Result<LoadedDataset, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_json_array = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json_array {
        let text = std::fs::read_to_string(path)?;
        parse_json_array(&text)
    } else {
        let file = std::fs::File::open(path)?;
        parse_jsonl(std::io::BufReader::new(file))
    }
}

/// Parse a JSON array of objects.
pub fn parse_json_array(text: &str) -> Result<LoadedDataset, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|e| InputError::InvalidJson {
        line: e.line(),
        message: e.to_string(),
    })?;

    let Value::Array(items) = value else {
        return Err(InputError::NotAnObject { line: 1 });
    };

    let objects = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object),
            _ => Err(InputError::NotAnObject { line: index + 1 }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadedDataset::from_objects(objects))
}

/// Parse JSONL: one object per line, blank lines skipped.
pub fn parse_jsonl(reader: impl BufRead) -> Result<LoadedDataset, InputError> {
    let mut objects = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let line_number = index + 1;
        let value: Value = serde_json::from_str(trimmed).map_err(|e| InputError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;
        match value {
            Value::Object(object) => objects.push(object),
            _ => return Err(InputError::NotAnObject { line: line_number }),
        }
    }

    Ok(LoadedDataset::from_objects(objects))
}
