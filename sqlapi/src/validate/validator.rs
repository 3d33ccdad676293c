//! Reusable validator for client-supplied WHERE clauses.

use super::column::assert_valid_sql_identifier;
use crate::ast::Expression;
use crate::error::Error;
use crate::process::Walker;
use std::collections::BTreeSet;

/// Default maximum nesting depth for [`WhereValidator::new`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Validation configuration for client-supplied WHERE clauses.
///
/// Provides two layers of security on top of the fixed grammar:
/// 1. Column whitelist - only listed columns can appear anywhere in the tree
/// 2. Nesting depth limit - bounds the work done per request
///
/// Unlike a plain [`process`](fn@crate::process) call, the validator owns its
/// whitelist, so one instance can be built at startup and shared by every
/// request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct WhereValidator {
    /// Allowed column names. Empty = no column is allowed.
    pub allowed_columns: BTreeSet<String>,
    /// Maximum nesting depth, `None` for unlimited.
    pub max_depth: Option<usize>,
}

impl WhereValidator {
    /// Create a validator with secure defaults.
    ///
    /// Defaults:
    /// - No columns allowed until [`allow_columns`](Self::allow_columns)
    /// - Max nesting depth: 32
    ///
    /// # Example
    ///
    /// ```
    /// use sqlapi::WhereValidator;
    ///
    /// let validator = WhereValidator::new()
    ///     .allow_columns(&["material", "weight"]);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allowed_columns: BTreeSet::new(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Create a validator without a depth limit.
    ///
    /// Behaves exactly like [`process`](fn@crate::process), and JSON input is
    /// decoded without a nesting cap. Only use this when the input size is
    /// already bounded upstream.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            allowed_columns: BTreeSet::new(),
            max_depth: None,
        }
    }

    /// Set allowed columns (whitelist), replacing any previous list.
    ///
    /// # Panics
    ///
    /// Panics if a name is not a valid SQL identifier.
    #[must_use]
    pub fn allow_columns(mut self, columns: &[&str]) -> Self {
        for column in columns {
            assert_valid_sql_identifier(column, "whitelisted column");
        }
        self.allowed_columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Set maximum nesting depth.
    ///
    /// The root node is at depth 0. Default is 32. The same limit applies
    /// while decoding JSON in [`sanitize_json`](Self::sanitize_json), so it
    /// may exceed [`MAX_DECODE_DEPTH`](crate::MAX_DECODE_DEPTH).
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Validate an expression and render the sanitized clause.
    ///
    /// # Example
    ///
    /// ```
    /// use sqlapi::prelude::*;
    ///
    /// let validator = WhereValidator::new().allow_columns(&["material", "weight"]);
    ///
    /// let sql = validator
    ///     .sanitize(&paren(and(equals("material", "steel"), between("weight", 10, 20))))
    ///     .unwrap();
    /// assert_eq!(sql, "(material = 'steel' AND weight BETWEEN 10 AND 20)");
    ///
    /// assert!(validator.sanitize(&between("retail_price", 500, 1000)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if:
    /// - A column is not in the allowed list
    /// - The tree contains `OR`
    /// - The tree is nested deeper than the maximum
    pub fn sanitize(&self, expr: &Expression) -> Result<String, Error> {
        let result = Walker::new(&self.allowed_columns, self.max_depth).expression(expr, 0);
        match &result {
            Ok(sql) => log::debug!("accepted where clause: {sql}"),
            Err(err) => log::debug!("rejected {} expression: {err}", expr.kind()),
        }
        result
    }

    /// Decode a JSON expression tree and sanitize it.
    ///
    /// # Example
    ///
    /// ```
    /// use sqlapi::WhereValidator;
    ///
    /// let validator = WhereValidator::new().allow_columns(&["weight"]);
    /// let sql = validator
    ///     .sanitize_json(r#"{
    ///         "type": "Between",
    ///         "column": {"type": "Column", "name": "weight"},
    ///         "lower": 10,
    ///         "upper": 20
    ///     }"#)
    ///     .unwrap();
    /// assert_eq!(sql, "weight BETWEEN 10 AND 20");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if decoding or validation fails.
    pub fn sanitize_json(&self, json_str: &str) -> Result<String, Error> {
        let expr = Expression::parse_with_max_depth(json_str, self.max_depth).inspect_err(|err| {
            log::debug!("rejected undecodable where clause: {err}");
        })?;
        self.sanitize(&expr)
    }

    /// Decode a JSON expression tree from raw bytes and sanitize it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the bytes are not UTF-8, or decoding or
    /// validation fails.
    pub fn sanitize_bytes(&self, bytes: &[u8]) -> Result<String, Error> {
        let expr = Expression::parse_bytes_with_max_depth(bytes, self.max_depth).inspect_err(|err| {
            log::debug!("rejected undecodable where clause: {err}");
        })?;
        self.sanitize(&expr)
    }
}

impl Default for WhereValidator {
    fn default() -> Self {
        Self::new()
    }
}
