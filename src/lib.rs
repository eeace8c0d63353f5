// JSON Query Engine
//
// Runs `SELECT <cols> FROM <table> [WHERE <expr>] [LIMIT <n>]` queries
// against an in-memory collection of rows.

pub mod dataset;
pub mod query;

// Re-export key items for convenient access
pub use query::parser::{parse, ParseError, Parser, ParsedQuery};
pub use query::executor::engine::{execute, ExecutionEngine};
pub use query::executor::result::{DataValue, QueryError, QueryResult, QueryResultSet, Row};
