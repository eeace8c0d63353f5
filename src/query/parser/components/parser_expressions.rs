// Expression Parser Implementation
//
// This module compiles a WHERE clause into an expression tree using operator
// precedence parsing over two explicit stacks: pending operators (and open
// parentheses) and operands.

use log::debug;

use crate::query::parser::ast::{Expression, Operator, Value};
use crate::query::parser::lexer::TokenType;
use super::parser_core::{Parser, ParseResult, ParseError};

/// Operand stack entry
#[derive(Debug)]
enum Operand {
    /// Bare word whose role is decided when it is reduced
    Bare(String),
    /// Literal or already-combined subtree
    Resolved(Expression),
}

impl Operand {
    /// Left operands of a comparison are always field references.
    fn into_left(self) -> Expression {
        match self {
            Operand::Bare(name) => Expression::Column(name),
            Operand::Resolved(expr) => expr,
        }
    }

    fn into_right(self) -> Expression {
        match self {
            Operand::Bare(word) => Expression::Literal(bare_literal(word)),
            Operand::Resolved(expr) => expr,
        }
    }
}

/// Unquoted words outside a left-operand position are literals
fn bare_literal(word: String) -> Value {
    if word.eq_ignore_ascii_case("true") {
        Value::Boolean(true)
    } else if word.eq_ignore_ascii_case("false") {
        Value::Boolean(false)
    } else {
        Value::String(word)
    }
}

/// Operator stack entry
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator { op: Operator, position: usize },
    LeftParen,
}

#[derive(Debug, Default)]
struct ExpressionStacks {
    operands: Vec<Operand>,
    operators: Vec<Pending>,
}

impl ExpressionStacks {
    /// Pop the top operator and its two operands, push the combined node
    fn reduce(&mut self, op: Operator, position: usize) -> ParseResult<()> {
        let right = self.operands.pop().ok_or_else(|| {
            ParseError::invalid_statement(
                format!("operator '{}' is missing its right operand", op),
                position,
            )
        })?;
        let left = self.operands.pop().ok_or_else(|| {
            ParseError::invalid_statement(
                format!("operator '{}' is missing its left operand", op),
                position,
            )
        })?;

        let left = left.into_left();
        let right = right.into_right();
        debug!("Binary operator: {} with op1 = {} and op2 = {}", op, left, right);

        self.operands
            .push(Operand::Resolved(Expression::binary(left, op, right)));
        Ok(())
    }

    /// Reduce every pending operator that binds at least as tightly, then push
    fn push_operator(&mut self, op: Operator, position: usize) -> ParseResult<()> {
        while let Some(&Pending::Operator { op: top, position: top_position }) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top, top_position)?;
        }
        self.operators.push(Pending::Operator { op, position });
        Ok(())
    }

    /// Reduce back to the matching `(` and discard it.
    ///
    /// A `)` without a matching `(` reduces everything pending.
    fn close_paren(&mut self) -> ParseResult<()> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::LeftParen => break,
                Pending::Operator { op, position } => self.reduce(op, position)?,
            }
        }
        Ok(())
    }

    /// Drain the operator stack and return the root, if any.
    ///
    /// Unmatched `(` are dropped.
    fn finish(mut self, clause_start: usize) -> ParseResult<Option<Expression>> {
        while let Some(pending) = self.operators.pop() {
            if let Pending::Operator { op, position } = pending {
                self.reduce(op, position)?;
            }
        }

        let root = self.operands.pop();
        if !self.operands.is_empty() {
            return Err(ParseError::invalid_statement(
                "WHERE clause has operands without an operator between them",
                clause_start,
            ));
        }

        Ok(root.map(Operand::into_right))
    }
}

/// Parse a WHERE clause starting at the parser's cursor.
///
/// Stops at the next clause keyword or the end of input, leaving the cursor
/// there. Returns `None` for an empty clause.
pub fn parse_expression(parser: &mut Parser) -> ParseResult<Option<Expression>> {
    let clause_start = parser.position();
    let mut stacks = ExpressionStacks::default();

    while let Some(token) = parser.next_expression_token()? {
        match token.token_type {
            TokenType::Operator(op) => stacks.push_operator(op, token.position)?,
            TokenType::LeftParen => stacks.operators.push(Pending::LeftParen),
            TokenType::RightParen => stacks.close_paren()?,
            TokenType::Identifier(word) => stacks.operands.push(Operand::Bare(word)),
            TokenType::Integer(i) => stacks
                .operands
                .push(Operand::Resolved(Expression::Literal(Value::Integer(i)))),
            TokenType::Float(f) => stacks
                .operands
                .push(Operand::Resolved(Expression::Literal(Value::Float(f)))),
            TokenType::String(s) => stacks
                .operands
                .push(Operand::Resolved(Expression::Literal(Value::String(s)))),
        }
    }

    stacks.finish(clause_start)
}
