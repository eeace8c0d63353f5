// Projection Operator Implementation
//
// This module implements the projection operator for selecting specific columns.

use std::borrow::Cow;

use crate::query::executor::operators::{BoxedOperator, Operator, RowRef};
use crate::query::executor::result::{Row, QueryResult, QueryError};
use crate::query::parser::ast::Projection;

/// Projection operator that selects specific columns from input rows
pub struct ProjectionOperator<'a> {
    /// The input operator
    input: BoxedOperator<'a>,
    /// The columns to project
    projection: &'a Projection,
    /// Whether the operator is initialized
    initialized: bool,
}

impl<'a> ProjectionOperator<'a> {
    /// Create a new projection operator
    pub fn new(input: BoxedOperator<'a>, projection: &'a Projection) -> Self {
        ProjectionOperator {
            input,
            projection,
            initialized: false,
        }
    }

    /// Project a row to only include the requested columns, in request order
    fn project_row(&self, row: RowRef<'a>) -> QueryResult<RowRef<'a>> {
        let columns = match self.projection {
            Projection::Wildcard => return Ok(row),
            Projection::Columns(columns) => columns,
        };

        let mut projected_row = Row::new();
        for column in columns {
            let value = row
                .get(column)
                .ok_or_else(|| QueryError::ColumnNotFound(column.clone()))?;
            projected_row.set(column.clone(), value.clone());
        }

        Ok(Cow::Owned(projected_row))
    }
}

impl<'a> Operator<'a> for ProjectionOperator<'a> {
    fn init(&mut self) -> QueryResult<()> {
        self.input.init()?;
        self.initialized = true;
        Ok(())
    }

    /// Get the next row with projected columns
    fn next(&mut self) -> QueryResult<Option<RowRef<'a>>> {
        if !self.initialized {
            return Err(QueryError::ExecutionError("Operator not initialized".to_string()));
        }

        match self.input.next()? {
            Some(row) => self.project_row(row).map(Some),
            None => Ok(None),
        }
    }

    fn close(&mut self) -> QueryResult<()> {
        self.initialized = false;
        self.input.close()
    }
}
