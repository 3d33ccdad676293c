//! Column whitelist lookup.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A read-only set of permitted column names.
///
/// Every column reference in an expression is checked against this set.
/// Implemented for the usual set and slice types so callers can pass
/// whatever their access-control layer already holds.
///
/// ```
/// use std::collections::HashSet;
/// use sqlapi::ColumnSet;
///
/// let set: HashSet<String> = ["material".to_string()].into();
/// assert!(set.contains_column("material"));
/// assert!(!["weight"].contains_column("material"));
/// ```
pub trait ColumnSet {
    /// Whether `name` is a permitted column.
    fn contains_column(&self, name: &str) -> bool;
}

impl<S: BuildHasher> ColumnSet for HashSet<String, S> {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<S: BuildHasher> ColumnSet for HashSet<&str, S> {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ColumnSet for BTreeSet<String> {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ColumnSet for BTreeSet<&str> {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ColumnSet for [&str] {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

impl<const N: usize> ColumnSet for [&str; N] {
    fn contains_column(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

impl ColumnSet for [String] {
    fn contains_column(&self, name: &str) -> bool {
        self.iter().any(|c| c == name)
    }
}

impl ColumnSet for Vec<String> {
    fn contains_column(&self, name: &str) -> bool {
        self.as_slice().contains_column(name)
    }
}

impl<T: ColumnSet + ?Sized> ColumnSet for &T {
    fn contains_column(&self, name: &str) -> bool {
        (**self).contains_column(name)
    }
}
