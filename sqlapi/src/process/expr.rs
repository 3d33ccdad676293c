//! Recursive validation and re-serialization of expression trees.

use super::columns::ColumnSet;
use super::value::process_value;
use crate::ast::{Column, Expression};
use crate::error::{Error, ErrorKind, Step};

/// Validate an expression against a column whitelist and render it as SQL.
///
/// The tree is walked depth-first, left to right. The first violation aborts
/// the walk; no partial output is ever returned.
///
/// | Node | Output |
/// |------|--------|
/// | `Column` | `name` (must be whitelisted) |
/// | `And` | `<left> AND <right>` |
/// | `Or` | always rejected |
/// | `Between` | `<column> BETWEEN <lower> AND <upper>` |
/// | `Parenthesis` | `(<inner>)`, `((x))` collapsed to `(x)` |
/// | `Equals` | `<column> = <value>` |
///
/// # Example
///
/// ```
/// use sqlapi::prelude::*;
///
/// let expr = and(equals("material", "steel"), between("weight", 10, 20));
/// let sql = process(&expr, &["material", "weight"]).unwrap();
///
/// assert_eq!(sql, "material = 'steel' AND weight BETWEEN 10 AND 20");
/// ```
///
/// # Errors
///
/// - [`ErrorKind::UnknownColumn`] if any column is not in `columns`
/// - [`ErrorKind::UnsupportedOperator`] if the tree contains `OR`
pub fn process<C: ColumnSet + ?Sized>(expr: &Expression, columns: &C) -> Result<String, Error> {
    Walker::new(columns, None).expression(expr, 0)
}

/// Tree walk shared by [`process`] and the depth-limited validator.
pub(crate) struct Walker<'a, C: ?Sized> {
    columns: &'a C,
    max_depth: Option<usize>,
}

impl<'a, C: ColumnSet + ?Sized> Walker<'a, C> {
    pub(crate) const fn new(columns: &'a C, max_depth: Option<usize>) -> Self {
        Self { columns, max_depth }
    }

    pub(crate) fn expression(&self, expr: &Expression, depth: usize) -> Result<String, Error> {
        self.enter(depth)?;

        match expr {
            Expression::Column(column) => self.column(column, depth),
            Expression::And { left, right } => {
                let left = self
                    .expression(left, depth + 1)
                    .map_err(|e| e.within(Step::AndLeft))?;
                let right = self
                    .expression(right, depth + 1)
                    .map_err(|e| e.within(Step::AndRight))?;
                Ok(format!("{left} AND {right}"))
            },
            // Operands are not inspected.
            Expression::Or { .. } => Err(Error::new(ErrorKind::UnsupportedOperator("OR"))),
            Expression::Between {
                column,
                lower,
                upper,
            } => {
                let column = self
                    .column(column, depth + 1)
                    .map_err(|e| e.within(Step::BetweenColumn))?;
                Ok(format!("{column} BETWEEN {lower} AND {upper}"))
            },
            Expression::Parenthesis(inner) => {
                // ((x)) -> (x), one level per call
                let inner = match inner.as_ref() {
                    Expression::Parenthesis(nested) => nested.as_ref(),
                    other => other,
                };
                let inner = self
                    .expression(inner, depth + 1)
                    .map_err(|e| e.within(Step::ParenthesisInner))?;
                Ok(format!("({inner})"))
            },
            Expression::Equals { column, value } => {
                let column = self
                    .column(column, depth + 1)
                    .map_err(|e| e.within(Step::EqualsColumn))?;
                let value = process_value(value).map_err(|e| e.within(Step::EqualsValue))?;
                Ok(format!("{column} = {value}"))
            },
        }
    }

    /// Every column reference funnels through here.
    fn column(&self, column: &Column, depth: usize) -> Result<String, Error> {
        self.enter(depth)?;

        if !self.columns.contains_column(&column.name) {
            return Err(Error::new(ErrorKind::UnknownColumn(column.name.clone())));
        }
        Ok(column.name.clone())
    }

    fn enter(&self, depth: usize) -> Result<(), Error> {
        match self.max_depth {
            Some(max) if depth > max => Err(Error::new(ErrorKind::NestingTooDeep { max })),
            _ => Ok(()),
        }
    }
}
