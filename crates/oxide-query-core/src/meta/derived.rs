//! Derived tables: subqueries used as relations.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::column::Column;
use super::find_ignore_case;
use super::relation::Relation;
use crate::error::{Error, Result};
use crate::grammar::{Identifier, SelectStatement, Subquery, TablePrimary, TableReference};

#[derive(Debug, PartialEq)]
struct DerivedDef {
    alias: String,
    query: SelectStatement,
    columns: BTreeSet<String>,
}

/// A subquery in FROM, always named.
///
/// Its columns re-project the inner query's projections by output name, so
/// `select(users.c("name")?.as_("author"))` exposes a column `author`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    def: Arc<DerivedDef>,
}

impl DerivedTable {
    /// Wraps `query` under the correlation name `alias`, exposing `columns`.
    #[must_use]
    pub fn new<I, S>(alias: impl Into<String>, query: SelectStatement, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            def: Arc::new(DerivedDef {
                alias: alias.into(),
                query,
                columns: columns.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// Returns the correlation name.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.def.alias
    }

    /// Returns the inner query.
    #[must_use]
    pub fn query(&self) -> &SelectStatement {
        &self.def.query
    }

    /// Looks up an outer column, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] when the inner query projects no
    /// such name.
    pub fn c(&self, name: &str) -> Result<Column> {
        let real = find_ignore_case(&self.def.columns, name).ok_or_else(|| {
            Error::UnknownColumn {
                table: self.def.alias.clone(),
                column: String::from(name),
            }
        })?;
        Ok(Column::new(Relation::Derived(self.clone()), String::from(real)))
    }

    /// Returns the outer columns sorted by name.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        self.def
            .columns
            .iter()
            .map(|name| Column::new(Relation::Derived(self.clone()), name.clone()))
            .collect()
    }

    /// Returns `(<subquery>) AS <alias>`.
    #[must_use]
    pub fn table_primary(&self) -> TablePrimary {
        TablePrimary::Derived {
            subquery: Subquery(Box::new(self.def.query.clone())),
            correlation: Identifier::new(&self.def.alias),
        }
    }

    /// Returns the `<table reference>`.
    #[must_use]
    pub fn table_reference(&self) -> TableReference {
        TableReference::Primary(self.table_primary())
    }
}
