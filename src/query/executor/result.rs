// Query Result Implementation
//
// This module defines the value, row and error types shared by the executor
// and the dataset loader.

use std::cmp::Ordering;
use std::fmt;

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::parser::ast::{Projection, Value};
use crate::query::parser::components::ParseError;

/// Possible data types for values in a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Text(s) => write!(f, "\"{}\"", s),
            DataValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl PartialOrd for DataValue {
    /// Orders numbers (integers and floats mixed), texts and booleans among
    /// themselves. Values of different kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (DataValue::Integer(a), DataValue::Integer(b)) => a.partial_cmp(b),
            (DataValue::Float(a), DataValue::Float(b)) => a.partial_cmp(b),
            (DataValue::Integer(a), DataValue::Float(b)) => (*a as f64).partial_cmp(b),
            (DataValue::Float(a), DataValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (DataValue::Text(a), DataValue::Text(b)) => Some(a.cmp(b)),
            (DataValue::Boolean(a), DataValue::Boolean(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl From<&Value> for DataValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(i) => DataValue::Integer(*i),
            Value::Float(f) => DataValue::Float(*f),
            Value::String(s) => DataValue::Text(s.clone()),
            Value::Boolean(b) => DataValue::Boolean(*b),
        }
    }
}

impl DataValue {
    /// Name of the value's kind, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Integer(_) => "integer",
            DataValue::Float(_) => "float",
            DataValue::Text(_) => "text",
            DataValue::Boolean(_) => "boolean",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// A record: field names mapped to values, in field order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: LinkedHashMap<String, DataValue>,
}

impl PartialEq for Row {
    /// Two rows are equal if they hold the same fields with the same values,
    /// regardless of field order.
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .all(|(column, value)| other.values.get(column) == Some(value))
    }
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Row {
            values: LinkedHashMap::new(),
        }
    }

    /// Create a row from column values
    pub fn from_values(columns: Vec<String>, values: Vec<DataValue>) -> Self {
        let mut row = Row::new();
        for (column, value) in columns.into_iter().zip(values) {
            row.set(column, value);
        }
        row
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        self.values.get(column)
    }

    /// Set a value for a column
    pub fn set(&mut self, column: String, value: DataValue) {
        self.values.insert(column, value);
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Column names in field order
    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, DataValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, DataValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.set(column.into(), value);
        }
        row
    }
}

/// Represents query execution error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Query text failed to compile
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Projection or filter references a field the row does not have
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// Operator applied to values of incompatible kinds
    #[error("Type mismatch: cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: String,
        left: String,
        right: String,
    },
    /// Filter did not reduce to a boolean, or AND/OR got non-boolean operands
    #[error("Invalid filter expression: {0}")]
    InvalidFilterExpression(String),
    /// Error during query execution
    #[error("Execution error: {0}")]
    ExecutionError(String),
    /// Input dataset could not be read or decoded
    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl QueryError {
    pub fn type_mismatch(op: impl fmt::Display, left: &DataValue, right: &DataValue) -> Self {
        QueryError::TypeMismatch {
            op: op.to_string(),
            left: format!("{} {}", left.type_name(), left),
            right: format!("{} {}", right.type_name(), right),
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query resultset representation
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResultSet {
    /// Column names in the resultset
    columns: Vec<String>,
    /// Rows of data
    rows: Vec<Row>,
}

impl QueryResultSet {
    /// Create a new empty resultset with column names
    pub fn new(columns: Vec<String>) -> Self {
        QueryResultSet {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a resultset from projected rows.
    ///
    /// Named projections keep the requested column order. For the wildcard the
    /// columns are every field seen across the rows, in first-seen order.
    pub fn from_rows(projection: &Projection, rows: Vec<Row>) -> Self {
        let columns = match projection.columns() {
            Some(columns) => columns.to_vec(),
            None => {
                let mut columns: Vec<String> = Vec::new();
                for row in &rows {
                    for column in row.columns() {
                        if !columns.contains(column) {
                            columns.push(column.clone());
                        }
                    }
                }
                columns
            }
        };

        QueryResultSet { columns, rows }
    }

    /// Add a row to the resultset
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the columns in the resultset
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the rows in the resultset
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Format the resultset as a string table
    pub fn to_string_table(&self) -> String {
        if self.columns.is_empty() {
            return "Empty result".to_string();
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| match row.get(column) {
                        Some(value) => value.to_string(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(column.len()))
                    .max()
                    .unwrap_or(0)
                    .max(3)
            })
            .collect();

        let mut result = String::new();

        // Column headers
        result.push('|');
        for (column, width) in self.columns.iter().zip(&widths) {
            result.push_str(&format!(" {:<width$} |", column, width = width));
        }
        result.push('\n');

        // Separator
        result.push('+');
        for width in &widths {
            result.push_str(&format!("{}+", "-".repeat(width + 2)));
        }
        result.push('\n');

        // Rows
        for row in &cells {
            result.push('|');
            for (cell, width) in row.iter().zip(&widths) {
                result.push_str(&format!(" {:<width$} |", cell, width = width));
            }
            result.push('\n');
        }

        result.push_str(&format!("({} rows)", self.rows.len()));
        result
    }

    /// Render the rows as a JSON array of objects
    pub fn to_json(&self) -> QueryResult<String> {
        serde_json::to_string_pretty(&self.rows)
            .map_err(|e| QueryError::Dataset(format!("Failed to serialize rows: {}", e)))
    }
}
