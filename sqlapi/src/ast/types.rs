//! Core types of the WHERE-clause expression tree.

/// A reference to a table column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Column name as written by the client.
    pub name: String,
}

impl Column {
    /// Create a column reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A literal on the right-hand side of `=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// String literal, rendered in single quotes.
    String(String),
    /// Integer literal, rendered in base 10.
    Integer(i64),
}

impl Value {
    /// Kind name used in error messages and the JSON wire form.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "StringValue",
            Self::Integer(_) => "IntegerValue",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

/// A WHERE-clause expression as produced by an upstream parser.
///
/// Each node owns its children. `Or` is part of the grammar so that it can be
/// recognized and rejected explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Column reference: `material`
    Column(Column),
    /// Conjunction: `<left> AND <right>`
    And {
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// Disjunction: `<left> OR <right>` (always rejected)
    Or {
        /// Left operand.
        left: Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
    },
    /// Range predicate: `<column> BETWEEN <lower> AND <upper>`
    Between {
        /// Column being constrained.
        column: Column,
        /// Lower bound.
        lower: i64,
        /// Upper bound.
        upper: i64,
    },
    /// Grouping: `(<inner>)`
    Parenthesis(Box<Expression>),
    /// Equality predicate: `<column> = <value>`
    Equals {
        /// Column on the left of `=`.
        column: Column,
        /// Literal on the right of `=`.
        value: Value,
    },
}

impl Expression {
    /// Kind name used in error messages and the JSON wire form.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Column(_) => "Column",
            Self::And { .. } => "And",
            Self::Or { .. } => "Or",
            Self::Between { .. } => "Between",
            Self::Parenthesis(_) => "Parenthesis",
            Self::Equals { .. } => "Equals",
        }
    }
}

impl From<Column> for Expression {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

/// Create a column reference expression.
pub fn column(name: impl Into<String>) -> Expression {
    Expression::Column(Column::new(name))
}

/// Create an AND expression.
#[must_use]
pub fn and(left: Expression, right: Expression) -> Expression {
    Expression::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Create an OR expression.
#[must_use]
pub fn or(left: Expression, right: Expression) -> Expression {
    Expression::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Create a BETWEEN expression.
pub fn between(column: impl Into<String>, lower: i64, upper: i64) -> Expression {
    Expression::Between {
        column: Column::new(column),
        lower,
        upper,
    }
}

/// Wrap an expression in parentheses.
#[must_use]
pub fn paren(inner: Expression) -> Expression {
    Expression::Parenthesis(Box::new(inner))
}

/// Create an equality expression.
pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    Expression::Equals {
        column: Column::new(column),
        value: value.into(),
    }
}
