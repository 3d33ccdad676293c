//! Expression and value processing: whitelist checks plus canonical rendering.

mod columns;
mod expr;
mod value;

pub(crate) use expr::Walker;

// Re-export all public items
pub use columns::ColumnSet;
pub use expr::process;
pub use value::process_value;
