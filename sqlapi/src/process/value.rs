//! Literal rendering for the right-hand side of `=`.

use crate::ast::Value;
use crate::error::Error;

/// Render a literal value as SQL text.
///
/// Strings are wrapped in single quotes exactly as given; embedded quotes are
/// not escaped here. Parameter binding belongs to the database client, and
/// the column whitelist is the boundary this crate enforces.
///
/// ```
/// use sqlapi::{Value, process_value};
///
/// assert_eq!(process_value(&Value::from("steel")).unwrap(), "'steel'");
/// assert_eq!(process_value(&Value::from(-42)).unwrap(), "-42");
/// ```
///
/// # Errors
///
/// Never fails for the value kinds currently modeled; the `Result` keeps the
/// signature uniform with [`process`](fn@crate::process).
#[allow(clippy::unnecessary_wraps)] // Same shape as process(), new value kinds may fail
pub fn process_value(value: &Value) -> Result<String, Error> {
    Ok(match value {
        Value::String(s) => format!("'{s}'"),
        Value::Integer(i) => i.to_string(),
    })
}
