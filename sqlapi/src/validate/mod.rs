//! Security validation layer for client-supplied WHERE clauses.
//!
//! This module provides:
//! - [`WhereValidator`]: an owned column whitelist plus a nesting depth limit
//! - SQL identifier checks for the names that go into the whitelist
//!
//! # Example
//!
//! ```
//! use sqlapi::WhereValidator;
//!
//! // Built once at startup, shared by every request
//! let validator = WhereValidator::new()
//!     .allow_columns(&["material", "weight"])
//!     .max_depth(16);
//!
//! // Per request: untrusted JSON in, sanitized clause out
//! let body = r#"{"type": "Column", "name": "retail_price"}"#;
//! assert!(validator.sanitize_json(body).is_err());
//! ```

mod column;
mod validator;

// Re-export all public items
pub use column::{MAX_IDENTIFIER_LENGTH, assert_valid_sql_identifier, is_valid_sql_identifier};
pub use validator::{DEFAULT_MAX_DEPTH, WhereValidator};
