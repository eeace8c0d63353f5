// SELECT Statement Parser Implementation
//
// This module implements the clause-level state machine that walks a query
// string through its SELECT, FROM, WHERE and LIMIT segments.

use log::debug;

use crate::query::parser::ast::{Expression, ParsedQuery, Projection, StatementKind};
use crate::query::parser::lexer::{Keyword, TokenType};
use super::parser_core::{Parser, ParseResult, ParseError};
use super::parser_expressions::parse_expression;

/// Statement verbs that are recognised but not executed
const UNSUPPORTED_STATEMENTS: [&str; 6] = ["INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Select,
    From,
    Where,
    Limit,
    NextOp,
    End,
}

impl State {
    fn for_clause(keyword: Keyword) -> State {
        match keyword {
            Keyword::Select => State::Select,
            Keyword::From => State::From,
            Keyword::Where => State::Where,
            Keyword::Limit => State::Limit,
        }
    }
}

/// Clause values collected while walking the statement
#[derive(Default)]
struct Clauses {
    op_type: Option<StatementKind>,
    projection: Option<Projection>,
    table_name: Option<String>,
    filter: Option<Expression>,
    limit: Option<usize>,
    seen: Vec<Keyword>,
}

/// Parse a complete SELECT statement
pub fn parse_select(parser: &mut Parser) -> ParseResult<ParsedQuery> {
    let mut state = State::Start;
    let mut clauses = Clauses::default();

    while let Some(ch) = parser.current_char() {
        if ch.is_whitespace() {
            parser.skip_whitespace();
            continue;
        }

        state = match state {
            State::Start | State::NextOp => {
                let position = parser.position();
                if !ch.is_alphabetic() {
                    return Err(ParseError::invalid_statement(
                        format!("expected a keyword, found '{}'", ch),
                        position,
                    ));
                }
                let word = parser.read_keyword();
                if state == State::Start {
                    start_statement(&word, position, &mut clauses)?
                } else {
                    next_clause(&word, position, &mut clauses)?
                }
            }
            State::Select => {
                if !(ch.is_alphanumeric() || ch == '*') {
                    return Err(ParseError::invalid_statement(
                        "column names cannot start with special characters",
                        parser.position(),
                    ));
                }
                clauses.projection = Some(parser.read_column_list()?);
                State::NextOp
            }
            State::From => {
                if !ch.is_alphanumeric() {
                    return Err(ParseError::invalid_statement(
                        "table name cannot start with special characters",
                        parser.position(),
                    ));
                }
                let table_name = parser.read_table_name();
                if let Some(projection) = &clauses.projection {
                    debug!("Selecting columns: {} from table: {}", projection, table_name);
                }
                clauses.table_name = Some(table_name);
                State::NextOp
            }
            State::Where => {
                let filter = parse_expression(parser)?.ok_or_else(|| {
                    ParseError::MalformedQuery("WHERE clause is empty".to_string())
                })?;
                debug!("Filtering with: {}", filter);
                clauses.filter = Some(filter);
                State::NextOp
            }
            State::Limit => {
                let limit = parse_limit(parser)?;
                debug!("LIMIT to {} rows", limit);
                clauses.limit = Some(limit);
                State::End
            }
            State::End => {
                return Err(ParseError::invalid_statement(
                    "unexpected input after LIMIT clause",
                    parser.position(),
                ));
            }
        };
    }

    match state {
        State::Where => return Err(ParseError::MalformedQuery("WHERE clause is empty".to_string())),
        State::Limit => {
            return Err(ParseError::MalformedQuery("LIMIT clause requires a row count".to_string()));
        }
        _ => {}
    }

    debug!("Parsing statement complete");
    assemble(clauses)
}

/// Handle the statement's leading keyword
fn start_statement(word: &str, position: usize, clauses: &mut Clauses) -> ParseResult<State> {
    if word == Keyword::Select.as_str() {
        debug!("Reading SELECT statement");
        clauses.op_type = Some(StatementKind::Select);
        clauses.seen.push(Keyword::Select);
        return Ok(State::Select);
    }

    if UNSUPPORTED_STATEMENTS.contains(&word) {
        return Err(ParseError::UnsupportedOperation(word.to_string()));
    }

    Err(ParseError::invalid_statement(
        format!("unrecognized statement keyword '{}'", word),
        position,
    ))
}

/// Handle a keyword between clauses
fn next_clause(word: &str, position: usize, clauses: &mut Clauses) -> ParseResult<State> {
    let keyword = match Keyword::lookup(word) {
        Some(keyword) => keyword,
        None => {
            return Err(ParseError::invalid_statement(
                format!("unexpected keyword '{}'", word),
                position,
            ));
        }
    };

    if clauses.seen.contains(&keyword) {
        return Err(ParseError::invalid_statement(
            format!("duplicate {} clause", keyword.as_str()),
            position,
        ));
    }
    clauses.seen.push(keyword);

    Ok(State::for_clause(keyword))
}

/// Parse the LIMIT row count
fn parse_limit(parser: &mut Parser) -> ParseResult<usize> {
    let position = parser.position();
    let is_digit = parser.current_char().is_some_and(|ch| ch.is_ascii_digit());
    if !is_digit {
        return Err(ParseError::invalid_statement(
            "LIMIT expects a non-negative integer",
            position,
        ));
    }

    let token = parser.read_number()?;
    match token.token_type {
        TokenType::Integer(n) => usize::try_from(n).map_err(|_| ParseError::InvalidNumber {
            literal: token.literal.clone(),
            position,
        }),
        _ => Err(ParseError::invalid_statement(
            format!("LIMIT expects an integer, found '{}'", token.literal),
            position,
        )),
    }
}

/// Build the final query from the collected clauses
fn assemble(clauses: Clauses) -> ParseResult<ParsedQuery> {
    let op_type = clauses
        .op_type
        .ok_or_else(|| ParseError::MalformedQuery("empty query".to_string()))?;
    let projection = clauses
        .projection
        .ok_or_else(|| ParseError::MalformedQuery("missing column list".to_string()))?;
    let table_name = clauses
        .table_name
        .ok_or_else(|| ParseError::MalformedQuery("missing table name".to_string()))?;

    Ok(ParsedQuery {
        op_type,
        projection,
        table_name,
        limit: clauses.limit,
        filter: clauses.filter,
    })
}
