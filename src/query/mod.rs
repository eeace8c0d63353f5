// Query Processing Module
//
// This module contains the query compiler and the executor that runs a
// compiled query against an in-memory dataset.

// Re-export key components
pub mod parser;
pub mod executor;

// Export key public interfaces
pub use parser::{parse, Parser, ParsedQuery};
pub use executor::engine::{execute, ExecutionEngine};
pub use executor::result::{QueryResult, QueryResultSet};
