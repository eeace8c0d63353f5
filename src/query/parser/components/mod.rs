// Query Parser Components
//
// This module contains the separate components of the query parser.
// Each component handles a specific aspect of parsing.

// Core parser component
pub mod parser_core;
pub mod parser_expressions;
pub mod parser_select;

// Re-export frequently used items
pub use parser_core::{parse, Parser, ParseResult, ParseError};
pub use parser_expressions::parse_expression;
pub use parser_select::parse_select;
