//! Identifiers, identifier chains and names.

use super::{Visitor, Walk};

/// A single `<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(pub String);

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `<identifier chain>`: `schema.table.column` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierChain(pub Vec<Identifier>);

impl IdentifierChain {
    /// Builds a chain from name segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Identifier::new).collect())
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[Identifier] {
        &self.0
    }
}

/// `<column reference>`.
///
/// The chain is `[relation effective name, column real name]` for every
/// reference produced by the metadata model. A column alias never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference(pub IdentifierChain);

impl ColumnReference {
    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(relation: impl Into<String>, column: impl Into<String>) -> Self {
        Self(IdentifierChain(vec![
            Identifier::new(relation),
            Identifier::new(column),
        ]))
    }

    /// Returns the qualifier (everything but the last segment), if any.
    #[must_use]
    pub fn qualifier(&self) -> Option<&str> {
        match self.0.segments() {
            [.., qualifier, _] => Some(qualifier.as_str()),
            _ => None,
        }
    }

    /// Returns the column name (last segment).
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.0.segments().last().map(Identifier::as_str)
    }
}

/// `<table name>`, optionally schema qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    /// Schema qualifier.
    pub schema: Option<Identifier>,
    /// Table name.
    pub name: Identifier,
}

impl TableName {
    /// Creates an unqualified table name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: Identifier::new(name),
        }
    }
}

impl Walk for Identifier {
    fn walk<V: Visitor + ?Sized>(&self, _visitor: &mut V) {}
}

impl Walk for ColumnReference {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.column_reference(self);
    }
}

impl Walk for TableName {
    fn walk<V: Visitor + ?Sized>(&self, _visitor: &mut V) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_reference() {
        let column = ColumnReference::qualified("users", "id");
        assert_eq!(column.qualifier(), Some("users"));
        assert_eq!(column.column(), Some("id"));
    }

    #[test]
    fn test_unqualified_reference_has_no_qualifier() {
        let column = ColumnReference(IdentifierChain::new(["id"]));
        assert_eq!(column.qualifier(), None);
        assert_eq!(column.column(), Some("id"));
    }
}
