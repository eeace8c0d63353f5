// Query Parser Module
//
// This module is responsible for compiling query strings into a ParsedQuery
// holding the projection, the table name, the row limit and the filter tree.

// Re-export public components
pub mod lexer;
pub mod ast;
pub mod components;

// Export key types
pub use self::components::{parse, Parser, ParseError, ParseResult};
pub use self::lexer::{Lexer, Token};
pub use self::ast::{Expression, ParsedQuery, Projection};
