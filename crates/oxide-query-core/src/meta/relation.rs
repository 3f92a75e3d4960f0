//! Relations: anything that can appear in FROM.

use std::fmt;

use super::column::Column;
use super::derived::DerivedTable;
use super::table::Table;
use crate::error::Result;
use crate::grammar::{TablePrimary, TableReference};

/// A table or a derived table.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// Catalog table.
    Table(Table),
    /// Subquery used as a table.
    Derived(DerivedTable),
}

impl Relation {
    /// Returns the alias if set, else the real name. Derived tables always
    /// have an alias.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        match self {
            Self::Table(table) => table.effective_name(),
            Self::Derived(derived) => derived.alias(),
        }
    }

    /// Looks up a column, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownColumn`] when the relation has no
    /// such column.
    pub fn c(&self, name: &str) -> Result<Column> {
        match self {
            Self::Table(table) => table.c(name),
            Self::Derived(derived) => derived.c(name),
        }
    }

    /// Returns every column sorted by name.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Self::Table(table) => table.columns(),
            Self::Derived(derived) => derived.columns(),
        }
    }

    /// Returns the `<table primary>`.
    #[must_use]
    pub fn table_primary(&self) -> TablePrimary {
        match self {
            Self::Table(table) => table.table_primary(),
            Self::Derived(derived) => derived.table_primary(),
        }
    }

    /// Returns the `<table reference>`.
    #[must_use]
    pub fn table_reference(&self) -> TableReference {
        TableReference::Primary(self.table_primary())
    }
}

impl From<Table> for Relation {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<DerivedTable> for Relation {
    fn from(derived: DerivedTable) -> Self {
        Self::Derived(derived)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.effective_name())
    }
}
