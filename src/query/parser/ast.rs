// Query Abstract Syntax Tree
//
// This module defines the parsed form of a query: the immutable statement value
// handed to the executor and the filter expression tree it owns.

use std::fmt;

/// The only statement kind this engine executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementKind::Select => write!(f, "SELECT"),
        }
    }
}

/// A fully parsed query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Statement kind (always SELECT)
    pub op_type: StatementKind,
    /// Columns requested in the SELECT clause
    pub projection: Projection,
    /// Table named in the FROM clause. Informational only.
    pub table_name: String,
    /// Maximum number of matching rows to return, `None` when unbounded
    pub limit: Option<usize>,
    /// WHERE clause (optional)
    pub filter: Option<Expression>,
}

impl ParsedQuery {
    /// Whether the query returns every field of every row
    pub fn is_wildcard(&self) -> bool {
        matches!(self.projection, Projection::Wildcard)
    }
}

/// Columns in a SELECT clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// All columns (*)
    Wildcard,
    /// Named columns, in request order
    Columns(Vec<String>),
}

impl Projection {
    /// Requested column names, `None` for the wildcard
    pub fn columns(&self) -> Option<&[String]> {
        match self {
            Projection::Wildcard => None,
            Projection::Columns(columns) => Some(columns),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Wildcard => write!(f, "*"),
            Projection::Columns(columns) => write!(f, "{}", columns.join(", ")),
        }
    }
}

/// Node of a filter expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Value),
    /// Column reference
    Column(String),
    /// Binary operation (e.g. x = y, a AND b)
    BinaryOp {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(name.into())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Column(name) => write!(f, "{}", name),
            Expression::BinaryOp { left, op, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Binary operators usable in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    // Logical
    And,
    Or,
}

/// Symbolic operators, longest first so `!=` is tried before `=`.
pub const SYMBOL_OPERATORS: [(&str, Operator); 4] = [
    ("!=", Operator::NotEquals),
    ("=", Operator::Equals),
    ("<", Operator::LessThan),
    (">", Operator::GreaterThan),
];

impl Operator {
    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Equals | Operator::NotEquals => 4,
            Operator::LessThan | Operator::GreaterThan => 3,
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }

    /// Look up a word operator (`AND`, `OR`), case-insensitively
    pub fn from_word(word: &str) -> Option<Operator> {
        match word.to_ascii_uppercase().as_str() {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
