// Table Scan Operator
//
// This module implements the scan over an in-memory dataset.

use std::borrow::Cow;

use crate::query::executor::operators::{Operator, RowRef};
use crate::query::executor::result::{Row, QueryResult, QueryError};

/// A table scan operator that yields every row of the dataset in order
pub struct TableScanOperator<'a> {
    /// Rows to scan
    rows: &'a [Row],
    /// Index of the next row to yield
    position: usize,
    /// Initialization status
    initialized: bool,
}

impl<'a> TableScanOperator<'a> {
    /// Create a new table scan operator
    pub fn new(rows: &'a [Row]) -> Self {
        TableScanOperator {
            rows,
            position: 0,
            initialized: false,
        }
    }

    /// Number of rows handed out so far
    pub fn rows_scanned(&self) -> usize {
        self.position
    }
}

impl<'a> Operator<'a> for TableScanOperator<'a> {
    fn init(&mut self) -> QueryResult<()> {
        self.position = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<RowRef<'a>>> {
        if !self.initialized {
            return Err(QueryError::ExecutionError("Operator not initialized".to_string()));
        }

        let rows = self.rows;
        match rows.get(self.position) {
            Some(row) => {
                self.position += 1;
                Ok(Some(Cow::Borrowed(row)))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) -> QueryResult<()> {
        self.initialized = false;
        Ok(())
    }
}
