// Query Lexer Implementation
//
// This module implements the character-level scanners used by the statement
// and expression compilers. Every scanner takes a start position and returns
// what it read together with the position just past it; the lexer itself is
// never mutated.

use std::fmt;

use super::ast::{Operator, Projection, SYMBOL_OPERATORS};
use super::components::parser_core::{ParseError, ParseResult};

/// Clause keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    Limit,
}

impl Keyword {
    /// Look up a clause keyword, case-insensitively
    pub fn lookup(word: &str) -> Option<Keyword> {
        match word.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Keyword::Select),
            "FROM" => Some(Keyword::From),
            "WHERE" => Some(Keyword::Where),
            "LIMIT" => Some(Keyword::Limit),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Limit => "LIMIT",
        }
    }
}

/// Token types produced inside a WHERE clause
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Literals
    String(String),
    Integer(i64),
    Float(f64),

    // Bare word: a column name or an unquoted literal
    Identifier(String),

    // Operators
    Operator(Operator),

    // Punctuation
    LeftParen,
    RightParen,
}

/// A Token represents a lexical unit in the query
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.literal)
    }
}

/// Scanner over a query string
pub struct Lexer {
    input: Vec<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
        }
    }

    /// Input length in characters
    pub(crate) fn len(&self) -> usize {
        self.input.len()
    }

    pub fn char_at(&self, position: usize) -> Option<char> {
        self.input.get(position).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn starts_with(&self, position: usize, pattern: &str) -> bool {
        let mut index = position;
        for expected in pattern.chars() {
            if self.char_at(index) != Some(expected) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Position of the first character at or after `start` failing `accept`
    fn scan_while(&self, start: usize, accept: impl Fn(char) -> bool) -> usize {
        let mut end = start;
        while let Some(ch) = self.char_at(end) {
            if !accept(ch) {
                break;
            }
            end += 1;
        }
        end
    }

    pub fn skip_whitespace(&self, position: usize) -> usize {
        self.scan_while(position, char::is_whitespace)
    }

    /// Read a run of letters, upper-cased
    pub fn read_keyword(&self, start: usize) -> (String, usize) {
        let end = self.scan_while(start, char::is_alphabetic);
        (self.slice(start, end).to_uppercase(), end)
    }

    /// Read a column name: letters, digits and underscores
    pub fn read_column_token(&self, start: usize) -> (String, usize) {
        let end = self.scan_while(start, |ch| ch.is_alphanumeric() || ch == '_');
        (self.slice(start, end), end)
    }

    /// Read an integer or float literal.
    ///
    /// Digits and at most one decimal point are consumed; a second decimal point
    /// fails with [`ParseError::InvalidNumber`] reporting the whole numeric run.
    pub fn read_number(&self, start: usize) -> ParseResult<(Token, usize)> {
        let mut end = start;
        let mut has_dot = false;

        while let Some(ch) = self.char_at(end) {
            if ch.is_ascii_digit() {
                end += 1;
            } else if ch == '.' {
                if has_dot {
                    let run_end = self.scan_while(end, |c| c.is_ascii_digit() || c == '.');
                    return Err(ParseError::InvalidNumber {
                        literal: self.slice(start, run_end),
                        position: start,
                    });
                }
                has_dot = true;
                end += 1;
            } else {
                break;
            }
        }

        let literal = self.slice(start, end);
        let token_type = if has_dot {
            literal.parse::<f64>().ok().map(TokenType::Float)
        } else {
            literal.parse::<i64>().ok().map(TokenType::Integer)
        };

        match token_type {
            Some(token_type) => Ok((
                Token {
                    token_type,
                    literal,
                    position: start,
                },
                end,
            )),
            None => Err(ParseError::InvalidNumber {
                literal,
                position: start,
            }),
        }
    }

    /// Read a string literal starting at its opening quote.
    ///
    /// No escapes are recognised. An unterminated string runs to the end of the
    /// input.
    pub fn read_string(&self, start: usize) -> (String, usize) {
        let quote = match self.char_at(start) {
            Some(ch) => ch,
            None => return (String::new(), start),
        };

        let end = self.scan_while(start + 1, |ch| ch != quote);
        let next = if end < self.len() { end + 1 } else { end };
        (self.slice(start + 1, end), next)
    }

    /// Read the comma-separated SELECT column list
    pub fn read_column_list(&self, start: usize) -> ParseResult<(Projection, usize)> {
        let end = self.scan_while(start, |ch| !ch.is_whitespace());
        let raw = self.slice(start, end);

        let columns: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect();

        if columns.iter().any(|column| column == "*") {
            if columns.len() == 1 {
                return Ok((Projection::Wildcard, end));
            }
            return Err(ParseError::invalid_statement(
                format!("wildcard '*' cannot be combined with column names in '{}'", raw),
                start,
            ));
        }

        if columns.is_empty() {
            return Err(ParseError::MalformedQuery(
                "SELECT clause names no columns".to_string(),
            ));
        }

        Ok((Projection::Columns(columns), end))
    }

    /// Read the FROM table name verbatim
    pub fn read_table_name(&self, start: usize) -> (String, usize) {
        let end = self.scan_while(start, |ch| !ch.is_whitespace());
        (self.slice(start, end), end)
    }

    /// Read the next token of a WHERE clause.
    ///
    /// Returns `None` at the end of input or when a clause keyword starts; in
    /// the keyword case the returned position is the keyword's start so the
    /// statement compiler can pick it up.
    pub fn next_expression_token(&self, position: usize) -> ParseResult<(Option<Token>, usize)> {
        let start = self.skip_whitespace(position);
        let ch = match self.char_at(start) {
            Some(ch) => ch,
            None => return Ok((None, start)),
        };

        if ch.is_ascii_digit() {
            let (token, next) = self.read_number(start)?;
            return Ok((Some(token), next));
        }

        let single = |token_type: TokenType| Token {
            token_type,
            literal: ch.to_string(),
            position: start,
        };

        match ch {
            '(' => Ok((Some(single(TokenType::LeftParen)), start + 1)),
            ')' => Ok((Some(single(TokenType::RightParen)), start + 1)),
            '\'' | '"' => {
                let (value, next) = self.read_string(start);
                let token = Token {
                    token_type: TokenType::String(value),
                    literal: self.slice(start, next),
                    position: start,
                };
                Ok((Some(token), next))
            }
            ch if ch.is_alphabetic() || ch == '_' => {
                let (word, next) = self.read_column_token(start);
                if Keyword::lookup(&word).is_some() {
                    return Ok((None, start));
                }

                let token_type = match Operator::from_word(&word) {
                    Some(op) => TokenType::Operator(op),
                    None => TokenType::Identifier(word.clone()),
                };
                let token = Token {
                    token_type,
                    literal: word,
                    position: start,
                };
                Ok((Some(token), next))
            }
            _ => {
                for (symbol, op) in SYMBOL_OPERATORS {
                    if self.starts_with(start, symbol) {
                        let token = Token {
                            token_type: TokenType::Operator(op),
                            literal: symbol.to_string(),
                            position: start,
                        };
                        return Ok((Some(token), start + symbol.len()));
                    }
                }
                Err(ParseError::invalid_statement(
                    format!("unexpected character '{}' in WHERE clause", ch),
                    start,
                ))
            }
        }
    }
}
