// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Node kind names in docs - backticks everywhere is noise
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![allow(clippy::must_use_candidate)] // Constructors - fluent API doesn't need must_use

//! # sqlapi - SQL WHERE Clauses as an API
//!
//! Accept filter expressions from untrusted clients as an already-parsed
//! syntax tree, check them against a fixed grammar and a column whitelist,
//! and re-serialize them into a canonical clause that can be appended to a
//! `WHERE` keyword.
//!
//! ## Quick Start
//!
//! ```
//! # use sqlapi::prelude::*;
//! // material = 'steel' AND weight BETWEEN 10 AND 20
//! let expr = and(equals("material", "steel"), between("weight", 10, 20));
//!
//! let sql = process(&expr, &["material", "weight"]).unwrap();
//! assert_eq!(sql, "material = 'steel' AND weight BETWEEN 10 AND 20");
//!
//! // Columns outside the whitelist are rejected
//! let err = process(&between("retail_price", 500, 1000), &["material", "weight"]).unwrap_err();
//! assert_eq!(err.kind(), &ErrorKind::UnknownColumn("retail_price".into()));
//! ```
//!
//! ## Grammar
//!
//! | Node | SQL |
//! |------|-----|
//! | `Column` | `material` |
//! | `And` | `<left> AND <right>` |
//! | `Between` | `weight BETWEEN 10 AND 20` |
//! | `Parenthesis` | `(<inner>)` |
//! | `Equals` | `material = 'steel'`, `weight = 12` |
//! | `Or` | rejected with `UnsupportedOperator("OR")` |
//!
//! ## JSON Input
//!
//! ```
//! # use sqlapi::prelude::*;
//! let validator = WhereValidator::new().allow_columns(&["material"]);
//!
//! let sql = validator.sanitize_json(r#"{
//!     "type": "Parenthesis",
//!     "inner": {
//!         "type": "Equals",
//!         "column": {"type": "Column", "name": "material"},
//!         "value": {"type": "StringValue", "value": "carbon"}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(sql, "(material = 'carbon')");
//! ```

mod ast;
mod error;
mod process;
mod validate;

pub use ast::{
    Column, Expression, MAX_DECODE_DEPTH, Value, and, between, column, equals, or, paren,
    parse_expression, parse_expression_bytes,
};
pub use error::{Error, ErrorKind, Step};
pub use process::{ColumnSet, process, process_value};
pub use validate::{
    DEFAULT_MAX_DEPTH, MAX_IDENTIFIER_LENGTH, WhereValidator, assert_valid_sql_identifier,
    is_valid_sql_identifier,
};

/// Re-export miniserde's json module for callers holding parsed JSON.
///
/// Use this to build values for [`Expression::from_json`].
pub use miniserde::json;

/// Prelude module for convenient imports.
///
/// ```
/// use sqlapi::prelude::*;
/// let sql = process(&column("weight"), &["weight"]).unwrap();
/// assert_eq!(sql, "weight");
/// ```
pub mod prelude {
    pub use crate::{
        Column, ColumnSet, Error, ErrorKind, Expression, Step, Value, WhereValidator, and,
        between, column, equals, or, paren, parse_expression, parse_expression_bytes, process,
        process_value,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn columns() -> HashSet<String> {
        ["material".to_string(), "weight".to_string()].into()
    }

    #[test]
    fn test_simple_and() {
        let expr = and(equals("material", "steel"), between("weight", 10, 20));
        assert_eq!(
            process(&expr, &columns()).unwrap(),
            "material = 'steel' AND weight BETWEEN 10 AND 20"
        );
    }

    #[test]
    fn test_parenthesized_and() {
        let expr = paren(and(equals("material", "steel"), between("weight", 10, 20)));
        assert_eq!(
            process(&expr, &columns()).unwrap(),
            "(material = 'steel' AND weight BETWEEN 10 AND 20)"
        );
    }

    #[test]
    fn test_json_and_builder_agree() {
        let built = and(equals("material", "steel"), between("weight", 10, 20));
        let decoded = parse_expression(
            r#"{
                "type": "And",
                "left": {
                    "type": "Equals",
                    "column": {"type": "Column", "name": "material"},
                    "value": {"type": "StringValue", "value": "steel"}
                },
                "right": {
                    "type": "Between",
                    "column": {"type": "Column", "name": "weight"},
                    "lower": 10,
                    "upper": 20
                }
            }"#,
        )
        .unwrap();

        assert_eq!(built, decoded);
        assert_eq!(process(&built, &columns()), process(&decoded, &columns()));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EDGE CASE TESTS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_or_nested_deep_in_tree() {
        let expr = paren(and(
            equals("material", "steel"),
            paren(or(equals("material", "carbon"), between("weight", 5, 15))),
        ));
        let err = process(&expr, &columns()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnsupportedOperator("OR"));
        assert_eq!(
            err.path(),
            &[Step::ParenthesisInner, Step::AndRight, Step::ParenthesisInner]
        );
    }

    #[test]
    fn test_string_value_with_sql_is_quoted_verbatim() {
        // Values are not escaped; the column whitelist is the boundary.
        let expr = equals("material", "steel' OR '1'='1");
        assert_eq!(
            process(&expr, &columns()).unwrap(),
            "material = 'steel' OR '1'='1'"
        );
    }

    #[test]
    fn test_whitelist_does_not_change_output() {
        let expr = and(equals("material", "steel"), between("weight", 10, 20));
        let wide: HashSet<&str> = ["material", "weight", "retail_price", "frame"].into();

        assert_eq!(process(&expr, &columns()), process(&expr, &wide));
    }
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

#[cfg(test)]
mod api_contracts {
    use static_assertions::assert_impl_all;

    // ========================================================================
    // Tree types
    // ========================================================================

    // Expression is Clone, Debug, PartialEq, Eq, Hash
    assert_impl_all!(crate::Expression: Clone, std::fmt::Debug, PartialEq, Eq, std::hash::Hash);

    // Column and Value are Clone, Debug, PartialEq, Eq
    assert_impl_all!(crate::Column: Clone, std::fmt::Debug, PartialEq, Eq);
    assert_impl_all!(crate::Value: Clone, std::fmt::Debug, PartialEq, Eq);

    // Trees can be processed from any thread
    assert_impl_all!(crate::Expression: Send, Sync);

    // ========================================================================
    // Error types
    // ========================================================================

    // Error is Clone, Debug, PartialEq, Eq, std::error::Error
    assert_impl_all!(crate::Error: Clone, std::fmt::Debug, PartialEq, Eq, std::error::Error);

    // ErrorKind is Clone, Debug, PartialEq, Eq
    assert_impl_all!(crate::ErrorKind: Clone, std::fmt::Debug, PartialEq, Eq);

    // Step is Copy, Clone, Debug, PartialEq, Eq
    assert_impl_all!(crate::Step: Copy, Clone, std::fmt::Debug, PartialEq, Eq);

    // Errors cross thread boundaries (anyhow, task joins)
    assert_impl_all!(crate::Error: Send, Sync);

    // ========================================================================
    // Validator
    // ========================================================================

    // WhereValidator is Clone, Debug, Default and shareable across handlers
    assert_impl_all!(crate::WhereValidator: Clone, std::fmt::Debug, Default, Send, Sync);
}
