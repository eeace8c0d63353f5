// Filter Operator Implementation
//
// This module implements the filter operator for filtering rows based on a
// compiled WHERE expression.

use crate::query::executor::expression_eval::evaluate_predicate;
use crate::query::executor::operators::{BoxedOperator, Operator, RowRef};
use crate::query::executor::result::{QueryResult, QueryError};
use crate::query::parser::ast::Expression;

/// Filter operator that filters rows based on a predicate
pub struct FilterOperator<'a> {
    /// The input operator
    input: BoxedOperator<'a>,
    /// The predicate to evaluate
    predicate: &'a Expression,
    /// Whether the operator is initialized
    initialized: bool,
}

impl<'a> FilterOperator<'a> {
    /// Create a new filter operator
    pub fn new(input: BoxedOperator<'a>, predicate: &'a Expression) -> Self {
        FilterOperator {
            input,
            predicate,
            initialized: false,
        }
    }
}

impl<'a> Operator<'a> for FilterOperator<'a> {
    fn init(&mut self) -> QueryResult<()> {
        self.input.init()?;
        self.initialized = true;
        Ok(())
    }

    /// Get the next row that satisfies the predicate
    fn next(&mut self) -> QueryResult<Option<RowRef<'a>>> {
        if !self.initialized {
            return Err(QueryError::ExecutionError("Operator not initialized".to_string()));
        }

        while let Some(row) = self.input.next()? {
            if evaluate_predicate(self.predicate, &row)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.initialized = false;
        self.input.close()
    }
}
