// Dataset Loading
//
// Reads a JSON array of flat objects into rows. Field values must be
// booleans, numbers or strings.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use crate::query::executor::result::{QueryError, QueryResult, Row};

/// Load a dataset from a JSON file
pub fn load_json(path: impl AsRef<Path>) -> QueryResult<Vec<Row>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        QueryError::Dataset(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let rows = parse_json(&contents)?;
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse a dataset from JSON text
pub fn parse_json(contents: &str) -> QueryResult<Vec<Row>> {
    let values: Vec<JsonValue> = serde_json::from_str(contents).map_err(|e| {
        QueryError::Dataset(format!("Expected a JSON array of objects: {}", e))
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_row(index, value))
        .collect()
}

fn decode_row(index: usize, value: JsonValue) -> QueryResult<Row> {
    let fields = match value.as_object() {
        Some(fields) => fields,
        None => {
            return Err(QueryError::Dataset(format!(
                "Row {} is not a JSON object",
                index
            )));
        }
    };

    // Integers past i64::MAX would otherwise decode as lossy floats
    if let Some((name, _)) = fields.iter().find(|(_, v)| v.is_u64() && v.as_i64().is_none()) {
        return Err(QueryError::Dataset(format!(
            "Row {} field '{}' is an integer outside the signed 64-bit range",
            index, name
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| QueryError::Dataset(format!("Row {} has an unsupported field value: {}", index, e)))
}
