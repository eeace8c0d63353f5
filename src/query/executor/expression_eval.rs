// Expression Evaluation Utility

use std::cmp::Ordering;

use log::trace;

use crate::query::parser::ast::{Expression, Operator};
use crate::query::executor::result::{DataValue, QueryError, QueryResult, Row};

impl Expression {
    /// Evaluate this expression against a row
    pub fn evaluate(&self, row: &Row) -> QueryResult<DataValue> {
        evaluate_expression(self, row)
    }
}

// Evaluate an AST expression in the context of a single row.
pub fn evaluate_expression(expr: &Expression, row: &Row) -> QueryResult<DataValue> {
    match expr {
        Expression::Literal(value) => Ok(DataValue::from(value)),
        Expression::Column(name) => row
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::ColumnNotFound(name.clone())),
        Expression::BinaryOp { left, op, right } => {
            let left_val = evaluate_expression(left, row)?;
            let right_val = evaluate_expression(right, row)?;
            trace!("Evaluating {} {} {}", left_val, op, right_val);
            apply_operator(*op, &left_val, &right_val)
        }
    }
}

/// Apply a binary operator to two evaluated operands
pub fn apply_operator(op: Operator, left: &DataValue, right: &DataValue) -> QueryResult<DataValue> {
    let result = match op {
        Operator::Equals => values_equal(op, left, right)?,
        Operator::NotEquals => !values_equal(op, left, right)?,
        Operator::LessThan => compare_ordered(op, left, right)? == Ordering::Less,
        Operator::GreaterThan => compare_ordered(op, left, right)? == Ordering::Greater,
        Operator::And | Operator::Or => {
            let (l, r) = match (left.as_bool(), right.as_bool()) {
                (Some(l), Some(r)) => (l, r),
                _ => {
                    return Err(QueryError::InvalidFilterExpression(format!(
                        "{} requires boolean operands, got {} and {}",
                        op,
                        left.type_name(),
                        right.type_name()
                    )));
                }
            };
            if op == Operator::And { l && r } else { l || r }
        }
    };
    Ok(DataValue::Boolean(result))
}

/// Equality across kinds: integers and floats compare numerically, every other
/// kind only equals its own kind.
fn values_equal(op: Operator, left: &DataValue, right: &DataValue) -> QueryResult<bool> {
    match (left, right) {
        (DataValue::Integer(l), DataValue::Integer(r)) => Ok(l == r),
        (DataValue::Float(l), DataValue::Float(r)) => Ok(l == r),
        (DataValue::Integer(l), DataValue::Float(r)) => Ok((*l as f64) == *r),
        (DataValue::Float(l), DataValue::Integer(r)) => Ok(*l == (*r as f64)),
        (DataValue::Text(l), DataValue::Text(r)) => Ok(l == r),
        (DataValue::Boolean(l), DataValue::Boolean(r)) => Ok(l == r),
        _ => Err(QueryError::type_mismatch(op, left, right)),
    }
}

fn compare_ordered(op: Operator, left: &DataValue, right: &DataValue) -> QueryResult<Ordering> {
    left.partial_cmp(right)
        .ok_or_else(|| QueryError::type_mismatch(op, left, right))
}

/// Evaluate a filter and require a boolean outcome
pub fn evaluate_predicate(expr: &Expression, row: &Row) -> QueryResult<bool> {
    let value = evaluate_expression(expr, row)?;
    value.as_bool().ok_or_else(|| {
        QueryError::InvalidFilterExpression(format!(
            "filter {} produced {} {} instead of a boolean",
            expr,
            value.type_name(),
            value
        ))
    })
}
