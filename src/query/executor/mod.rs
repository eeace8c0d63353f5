// Query Executor Module
//
// This module is responsible for running parsed queries against a dataset.
// It implements the iterator-based execution model for query processing.

pub mod engine;
pub mod result;
pub mod expression_eval;
pub mod operators;

// Export key types
pub use self::engine::{execute, ExecutionEngine};
pub use self::expression_eval::{evaluate_expression, evaluate_predicate};
pub use self::result::{DataValue, QueryError, QueryResult, QueryResultSet, Row};
pub use self::operators::Operator;
