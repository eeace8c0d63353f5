// Query Operators Module
//
// This module defines the operators used for query execution in the
// iterator-based execution model: scan → filter → limit → project.

pub mod scan;
pub mod filter;
pub mod limit;
pub mod project;

use std::borrow::Cow;

use crate::query::executor::result::{Row, QueryResult};

/// Rows flow through the pipeline borrowed from the dataset until an operator
/// has to build a new one.
pub type RowRef<'a> = Cow<'a, Row>;

/// Boxed operator borrowing from the dataset and the parsed query
pub type BoxedOperator<'a> = Box<dyn Operator<'a> + 'a>;

/// The Operator trait defines the interface for all query execution operators
/// in the iterator-based execution model. Each operator pulls rows from its
/// input and passes them to the next operator in the execution plan.
pub trait Operator<'a> {
    /// Initialize the operator before execution
    fn init(&mut self) -> QueryResult<()>;

    /// Get the next row of data from this operator
    fn next(&mut self) -> QueryResult<Option<RowRef<'a>>>;

    /// Close the operator and release any resources
    fn close(&mut self) -> QueryResult<()>;
}

pub use filter::FilterOperator;
pub use limit::LimitOperator;
pub use project::ProjectionOperator;
pub use scan::TableScanOperator;
