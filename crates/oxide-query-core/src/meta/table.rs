//! Tables and table schemas.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::column::Column;
use super::find_ignore_case;
use super::relation::Relation;
use crate::error::{Error, Result};
use crate::grammar::{Identifier, TableName, TablePrimary, TableReference};

/// Static description of a table: what a catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    schema: Option<String>,
    name: String,
    columns: Vec<String>,
}

impl TableSchema {
    /// Creates a schema for the table `name` with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Qualifies the table with a schema name (`schema.table`).
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(name.into());
        self
    }

    /// Adds several columns.
    #[must_use]
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds a column in place.
    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the schema qualifier.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns the column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TableDef {
    pub(crate) catalog: String,
    pub(crate) schema: Option<String>,
    pub(crate) name: String,
    pub(crate) columns: BTreeSet<String>,
}

impl TableDef {
    pub(crate) fn new(catalog: &str, schema: TableSchema) -> Self {
        Self {
            catalog: String::from(catalog),
            schema: schema.schema,
            name: schema.name,
            columns: schema.columns.into_iter().collect(),
        }
    }
}

/// Handle to a catalog table, optionally aliased.
///
/// Handles are cheap to clone. [`Table::as_`] returns an aliased copy; the
/// catalog entry is never mutated.
#[derive(Debug, Clone)]
pub struct Table {
    def: Arc<TableDef>,
    alias: Option<String>,
}

impl Table {
    pub(crate) const fn from_def(def: Arc<TableDef>) -> Self {
        Self { def, alias: None }
    }

    /// Returns the real table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Returns the schema qualifier.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.def.schema.as_deref()
    }

    /// Returns the name of the catalog the table belongs to.
    #[must_use]
    pub fn catalog_name(&self) -> &str {
        &self.def.catalog
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the alias if set, else the real name.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.def.name)
    }

    /// Returns an aliased copy of the table.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            def: Arc::clone(&self.def),
            alias: Some(alias.into()),
        }
    }

    /// Looks up a column, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] when the table has no such column.
    pub fn c(&self, name: &str) -> Result<Column> {
        self.column(name)
    }

    /// Same as [`Table::c`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] when the table has no such column.
    pub fn column(&self, name: &str) -> Result<Column> {
        let real = self.resolve_column(name)?;
        Ok(Column::new(Relation::Table(self.clone()), real))
    }

    /// Returns every column sorted by real name.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        self.def
            .columns
            .iter()
            .map(|name| Column::new(Relation::Table(self.clone()), name.clone()))
            .collect()
    }

    /// Returns the column names sorted.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.def.columns.iter().cloned().collect()
    }

    /// Returns the real column name matching `name`, ignoring ASCII case.
    pub(crate) fn resolve_column(&self, name: &str) -> Result<String> {
        find_ignore_case(&self.def.columns, name)
            .map(String::from)
            .ok_or_else(|| Error::UnknownColumn {
                table: String::from(self.effective_name()),
                column: String::from(name),
            })
    }

    /// Returns the grammar table name.
    #[must_use]
    pub fn table_name(&self) -> TableName {
        TableName {
            schema: self.def.schema.as_deref().map(Identifier::new),
            name: Identifier::new(&self.def.name),
        }
    }

    /// Returns the `<table primary>` (`name [AS alias]`).
    #[must_use]
    pub fn table_primary(&self) -> TablePrimary {
        TablePrimary::Table {
            name: self.table_name(),
            correlation: self.alias.as_deref().map(Identifier::new),
        }
    }

    /// Returns the `<table reference>`.
    #[must_use]
    pub fn table_reference(&self) -> TableReference {
        TableReference::Primary(self.table_primary())
    }

    pub(crate) fn correlation(&self) -> Option<Identifier> {
        self.alias.as_deref().map(Identifier::new)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.def, &other.def) || self.def == other.def) && self.alias == other.alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organizations() -> Table {
        let schema = TableSchema::new("organizations").columns(["id", "root_organization_id"]);
        Table::from_def(Arc::new(TableDef::new("app", schema)))
    }

    #[test]
    fn test_alias_is_a_copy() {
        let orgs = organizations();
        let o1 = orgs.as_("o1");
        assert_eq!(orgs.effective_name(), "organizations");
        assert_eq!(o1.effective_name(), "o1");
        assert_eq!(o1.name(), "organizations");
        assert_ne!(orgs, o1);
        assert_ne!(o1, orgs.as_("o2"));
    }

    #[test]
    fn test_column_lookup_ignores_case() {
        let orgs = organizations();
        let a = orgs.c("ID").unwrap();
        let b = orgs.c("id").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name(), "id");
    }

    #[test]
    fn test_unknown_column() {
        let err = organizations().c("nope").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownColumn {
                table: String::from("organizations"),
                column: String::from("nope"),
            }
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_schema_builder() {
        let mut schema = TableSchema::new("columns").in_schema("information_schema");
        schema.add_column("table_name");
        assert_eq!(schema.schema(), Some("information_schema"));
        assert_eq!(schema.column_names(), ["table_name"]);
    }
}
