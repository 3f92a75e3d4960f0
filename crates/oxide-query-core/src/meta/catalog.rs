//! The table catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::table::{Table, TableDef, TableSchema};
use crate::dialect::Dialect;
use crate::error::{Error, Result};

/// Types that describe a table statically, usually through
/// `#[derive(Table)]`.
pub trait TableDefinition {
    /// Returns the table description.
    fn table_schema() -> TableSchema;
}

/// In-memory catalog of one database's tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    database_name: String,
    dialect: Dialect,
    tables: BTreeMap<String, Arc<TableDef>>,
}

impl Catalog {
    /// Creates an empty catalog for `database_name`.
    #[must_use]
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            dialect: Dialect::default(),
            tables: BTreeMap::new(),
        }
    }

    /// Sets the dialect of the database the catalog describes.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Returns the database name.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Adds (or replaces) a table and returns its handle.
    pub fn add_table(&mut self, schema: TableSchema) -> Table {
        let def = Arc::new(TableDef::new(&self.database_name, schema));
        self.tables.insert(def.name.clone(), Arc::clone(&def));
        Table::from_def(def)
    }

    /// Adds the table described by `T`.
    pub fn register<T: TableDefinition>(&mut self) -> Table {
        self.add_table(T::table_schema())
    }

    /// Looks up a table by real name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTable`] when the catalog has no such table.
    pub fn table(&self, name: &str) -> Result<Table> {
        if let Some(def) = self.tables.get(name) {
            return Ok(Table::from_def(Arc::clone(def)));
        }
        self.tables
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, def)| Table::from_def(Arc::clone(def)))
            .ok_or_else(|| Error::UnknownTable(String::from(name)))
    }

    /// Returns every table sorted by name.
    #[must_use]
    pub fn tables(&self) -> Vec<Table> {
        self.tables
            .values()
            .map(|def| Table::from_def(Arc::clone(def)))
            .collect()
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the catalog has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
