// Limit Operator Implementation
//
// Stops pulling from its input once enough rows have been emitted.

use crate::query::executor::operators::{BoxedOperator, Operator, RowRef};
use crate::query::executor::result::{QueryResult, QueryError};

/// Limit operator that bounds the number of rows passed downstream
pub struct LimitOperator<'a> {
    /// The input operator
    input: BoxedOperator<'a>,
    /// Maximum number of rows to emit
    limit: usize,
    /// Rows emitted so far
    emitted: usize,
    /// Whether the operator is initialized
    initialized: bool,
}

impl<'a> LimitOperator<'a> {
    /// Create a new limit operator
    pub fn new(input: BoxedOperator<'a>, limit: usize) -> Self {
        LimitOperator {
            input,
            limit,
            emitted: 0,
            initialized: false,
        }
    }
}

impl<'a> Operator<'a> for LimitOperator<'a> {
    fn init(&mut self) -> QueryResult<()> {
        self.input.init()?;
        self.emitted = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<RowRef<'a>>> {
        if !self.initialized {
            return Err(QueryError::ExecutionError("Operator not initialized".to_string()));
        }

        if self.emitted >= self.limit {
            return Ok(None);
        }

        let row = self.input.next()?;
        if row.is_some() {
            self.emitted += 1;
        }
        Ok(row)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.initialized = false;
        self.input.close()
    }
}
