//! Metadata model: catalog, tables, columns and derived tables.
//!
//! Handles hand out cheap clones of shared, immutable definitions. Aliasing
//! a table produces a new handle; the catalog entry is never touched.

mod catalog;
mod column;
mod derived;
mod projection;
mod relation;
mod table;

use std::collections::BTreeSet;

pub use catalog::{Catalog, TableDefinition};
pub use column::Column;
pub use derived::DerivedTable;
pub use projection::{Function, FunctionBody, Projection, ScalarSubquery};
pub use relation::Relation;
pub use table::{Table, TableSchema};

/// Exact match first, then an ASCII case-insensitive scan.
fn find_ignore_case<'a>(names: &'a BTreeSet<String>, name: &str) -> Option<&'a str> {
    names
        .get(name)
        .or_else(|| names.iter().find(|n| n.eq_ignore_ascii_case(name)))
        .map(String::as_str)
}
