//! Error types for expression decoding and processing.
//!
//! Every failure carries two things:
//! - an [`ErrorKind`] naming the root cause (unknown column, rejected operator, ...)
//! - a path of [`Step`]s locating the failing node, from the root of the tree down
//!
//! Tests and callers can match on both without parsing the display string.
//!
//! ```
//! use sqlapi::{Error, ErrorKind, Step};
//!
//! let err = Error::new(ErrorKind::UnknownColumn("retail_price".into()))
//!     .within(Step::BetweenColumn)
//!     .within(Step::AndRight);
//!
//! assert_eq!(err.path(), &[Step::AndRight, Step::BetweenColumn]);
//! assert_eq!(
//!     err.to_string(),
//!     "And.right -> Between.column: column `retail_price` is unknown and not supported"
//! );
//! ```

use std::fmt;

/// Root cause of a rejected expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Column name is not in the whitelist.
    UnknownColumn(String),
    /// Operator is recognized but deliberately not supported (`OR`).
    UnsupportedOperator(&'static str),
    /// Node kind outside the modeled expression grammar.
    UnsupportedExpression(String),
    /// Value kind outside the modeled value grammar.
    UnsupportedValue(String),
    /// Expression tree is nested deeper than allowed.
    NestingTooDeep {
        /// The maximum allowed nesting depth.
        max: usize,
    },
    /// Input is not valid JSON or not valid UTF-8.
    InvalidJson,
    /// Expected a JSON object for a node.
    ExpectedObject,
    /// A required member of a node object is absent.
    MissingField(&'static str),
    /// A member of a node object has the wrong shape.
    InvalidField {
        /// The offending member name.
        field: &'static str,
        /// Description of what was expected.
        expected: &'static str,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn(name) => {
                write!(f, "column `{name}` is unknown and not supported")
            },
            Self::UnsupportedOperator(op) => write!(f, "{op} clauses are not supported"),
            Self::UnsupportedExpression(kind) => write!(f, "unsupported expression type `{kind}`"),
            Self::UnsupportedValue(kind) => write!(f, "unsupported value type `{kind}`"),
            Self::NestingTooDeep { max } => {
                write!(f, "expression nesting depth exceeds maximum {max}")
            },
            Self::InvalidJson => write!(f, "invalid JSON syntax or encoding"),
            Self::ExpectedObject => write!(f, "expected JSON object"),
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::InvalidField { field, expected } => {
                write!(f, "field `{field}` expects {expected}")
            },
        }
    }
}

/// One level of the tree walk, recorded as an error propagates upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Step {
    /// Left operand of `AND`.
    AndLeft,
    /// Right operand of `AND`.
    AndRight,
    /// Left operand of `OR` (only reached while decoding).
    OrLeft,
    /// Right operand of `OR` (only reached while decoding).
    OrRight,
    /// Column of `BETWEEN`.
    BetweenColumn,
    /// Lower bound of `BETWEEN` (only reached while decoding).
    BetweenLower,
    /// Upper bound of `BETWEEN` (only reached while decoding).
    BetweenUpper,
    /// Expression inside a parenthesis.
    ParenthesisInner,
    /// Column of `=`.
    EqualsColumn,
    /// Value of `=`.
    EqualsValue,
}

impl Step {
    /// Human-readable label, e.g. `And.left`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AndLeft => "And.left",
            Self::AndRight => "And.right",
            Self::OrLeft => "Or.left",
            Self::OrRight => "Or.right",
            Self::BetweenColumn => "Between.column",
            Self::BetweenLower => "Between.lower",
            Self::BetweenUpper => "Between.upper",
            Self::ParenthesisInner => "Parenthesis.inner",
            Self::EqualsColumn => "Equals.column",
            Self::EqualsValue => "Equals.value",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected expression: root cause plus where in the tree it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    /// Root-to-leaf.
    path: Vec<Step>,
}

impl Error {
    /// Create an error at the node currently being visited.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// Record that this error surfaced through `step` of the parent node.
    #[must_use]
    pub fn within(mut self, step: Step) -> Self {
        self.path.insert(0, step);
        self
    }

    /// The root cause.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the error, keeping only the root cause.
    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Location of the failing node, outermost step first.
    #[must_use]
    pub fn path(&self) -> &[Step] {
        &self.path
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(step.as_str())?;
        }
        if !self.path.is_empty() {
            f.write_str(": ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_path() {
        let err = Error::new(ErrorKind::UnsupportedOperator("OR"));
        assert_eq!(err.to_string(), "OR clauses are not supported");
        assert!(err.path().is_empty());
    }

    #[test]
    fn test_within_prepends_outer_steps() {
        let err = Error::new(ErrorKind::UnknownColumn("secret".into()))
            .within(Step::EqualsColumn)
            .within(Step::AndLeft)
            .within(Step::ParenthesisInner);

        assert_eq!(
            err.path(),
            &[Step::ParenthesisInner, Step::AndLeft, Step::EqualsColumn]
        );
        assert_eq!(
            err.to_string(),
            "Parenthesis.inner -> And.left -> Equals.column: \
             column `secret` is unknown and not supported"
        );
    }

    #[test]
    fn test_into_kind() {
        let err = Error::from(ErrorKind::UnsupportedValue("Column".into())).within(Step::EqualsValue);
        assert_eq!(
            err.into_kind(),
            ErrorKind::UnsupportedValue("Column".into())
        );
    }

    #[test]
    fn test_kind_display() {
        let msg = ErrorKind::NestingTooDeep { max: 4 }.to_string();
        assert!(msg.contains('4'));

        let msg = ErrorKind::InvalidField {
            field: "lower",
            expected: "an integer",
        }
        .to_string();
        assert_eq!(msg, "field `lower` expects an integer");

        assert_eq!(
            ErrorKind::MissingField("name").to_string(),
            "missing field `name`"
        );
        assert_eq!(
            ErrorKind::UnsupportedExpression("Like".into()).to_string(),
            "unsupported expression type `Like`"
        );
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(Step::AndLeft.to_string(), "And.left");
        assert_eq!(Step::AndRight.to_string(), "And.right");
        assert_eq!(Step::OrLeft.to_string(), "Or.left");
        assert_eq!(Step::BetweenColumn.to_string(), "Between.column");
        assert_eq!(Step::BetweenLower.to_string(), "Between.lower");
        assert_eq!(Step::BetweenUpper.to_string(), "Between.upper");
        assert_eq!(Step::ParenthesisInner.to_string(), "Parenthesis.inner");
        assert_eq!(Step::EqualsColumn.to_string(), "Equals.column");
        assert_eq!(Step::EqualsValue.to_string(), "Equals.value");
    }
}
