//! Expression tree types and their JSON wire form.

mod parse;
mod types;

// Re-export all public items
pub use parse::{MAX_DECODE_DEPTH, parse_expression, parse_expression_bytes};
pub use types::{Column, Expression, Value, and, between, column, equals, or, paren};
