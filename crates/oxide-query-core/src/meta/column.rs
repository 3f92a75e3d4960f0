//! Column handles.

use super::relation::Relation;
use crate::grammar::{
    ColumnReference, CommonValueExpression, DerivedColumn, Identifier,
    NonparenthesizedValueExpressionPrimary, SortSpecification, ValueExpression,
};

/// A column bound to its relation.
///
/// The relation is a read-only back link used to qualify the column
/// reference; the alias only ever shows up as `AS <alias>` in a select list.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    relation: Relation,
    name: String,
    alias: Option<String>,
}

impl Column {
    pub(crate) const fn new(relation: Relation, name: String) -> Self {
        Self {
            relation,
            name,
            alias: None,
        }
    }

    /// Returns the real column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the alias if set, else the real name.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the owning relation.
    #[must_use]
    pub const fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Returns a copy of the column with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns `<relation effective name>.<real name>`.
    #[must_use]
    pub fn column_reference(&self) -> ColumnReference {
        ColumnReference::qualified(self.relation.effective_name(), &self.name)
    }

    /// Returns the column as a value expression.
    #[must_use]
    pub fn value_expression(&self) -> ValueExpression {
        ValueExpression::Common(CommonValueExpression::from(
            NonparenthesizedValueExpressionPrimary::ColumnReference(self.column_reference()),
        ))
    }

    /// Returns the select-list entry, carrying the alias.
    #[must_use]
    pub fn derived_column(&self) -> DerivedColumn {
        DerivedColumn {
            value: self.value_expression(),
            alias: self.alias.as_deref().map(Identifier::new),
        }
    }

    /// Returns an ascending sort on this column.
    #[must_use]
    pub fn asc(&self) -> SortSpecification {
        SortSpecification::new(self.value_expression()).asc()
    }

    /// Returns a descending sort on this column.
    #[must_use]
    pub fn desc(&self) -> SortSpecification {
        SortSpecification::new(self.value_expression()).desc()
    }
}
