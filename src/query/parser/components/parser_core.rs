// Core Parser Implementation
//
// This module implements the core parser state shared by the statement and
// expression compilers: the cursor over the query text and the parse errors.

use thiserror::Error;

use crate::query::parser::ast::{ParsedQuery, Projection};
use crate::query::parser::lexer::{Lexer, Token};
use super::parser_select::parse_select;

/// Query parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unrecognised keyword, misplaced clause or malformed clause content
    #[error("Invalid statement at position {position}: {reason}")]
    InvalidStatement { reason: String, position: usize },
    /// Numeric literal with more than one decimal point, or out of range
    #[error("Invalid number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },
    /// A required clause is missing or empty
    #[error("Malformed query: {0}")]
    MalformedQuery(String),
    /// Statement kind other than SELECT
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl ParseError {
    pub fn invalid_statement(reason: impl Into<String>, position: usize) -> Self {
        ParseError::InvalidStatement {
            reason: reason.into(),
            position,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Query parser holding a cursor over the query text.
///
/// Each scanner call reads from the current position and moves the cursor past
/// what it consumed. All parse state lives in the parser value itself, so
/// independent parsers can run concurrently.
pub struct Parser {
    lexer: Lexer,
    position: usize,
}

impl Parser {
    /// Create a new parser from a query string
    pub fn new(input: &str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            position: 0,
        }
    }

    /// Parse the whole input as a single statement
    pub fn parse_statement(&mut self) -> ParseResult<ParsedQuery> {
        parse_select(self)
    }

    /// Current cursor position (in characters)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Character under the cursor, `None` at end of input
    pub fn current_char(&self) -> Option<char> {
        self.lexer.char_at(self.position)
    }

    /// Move the cursor forward by one character
    pub fn advance(&mut self) {
        if self.position < self.lexer.len() {
            self.position += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.position = self.lexer.skip_whitespace(self.position);
    }

    /// Read a keyword at the cursor (upper-cased)
    pub fn read_keyword(&mut self) -> String {
        let (word, next) = self.lexer.read_keyword(self.position);
        self.position = next;
        word
    }

    /// Read the SELECT column list at the cursor
    pub fn read_column_list(&mut self) -> ParseResult<Projection> {
        let (projection, next) = self.lexer.read_column_list(self.position)?;
        self.position = next;
        Ok(projection)
    }

    /// Read the FROM table name at the cursor
    pub fn read_table_name(&mut self) -> String {
        let (name, next) = self.lexer.read_table_name(self.position);
        self.position = next;
        name
    }

    /// Read the next WHERE-clause token, `None` once the clause ends
    pub fn next_expression_token(&mut self) -> ParseResult<Option<Token>> {
        let (token, next) = self.lexer.next_expression_token(self.position)?;
        self.position = next;
        Ok(token)
    }

    /// Read a numeric literal token at the cursor
    pub fn read_number(&mut self) -> ParseResult<Token> {
        let (token, next) = self.lexer.read_number(self.position)?;
        self.position = next;
        Ok(token)
    }
}

/// Parse a query string into a [`ParsedQuery`]
pub fn parse(sql: &str) -> ParseResult<ParsedQuery> {
    Parser::new(sql).parse_statement()
}
