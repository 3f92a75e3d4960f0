//! Cursor specifications: ORDER BY and LIMIT on top of a query.

use super::literal::UnsignedNumericLiteral;
use super::query::QuerySpecification;
use super::value::ValueExpression;
use super::{Visitor, Walk};

/// A complete SELECT: either a bare query or a cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectStatement {
    /// A query specification.
    Query(QuerySpecification),
    /// A query with ORDER BY and/or LIMIT.
    Cursor(CursorSpecification),
}

/// `<cursor specification>` with the LIMIT/OFFSET extension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorSpecification {
    /// Inner query.
    pub query: QuerySpecification,
    /// ORDER BY list.
    pub order_by: Option<OrderByClause>,
    /// LIMIT / OFFSET.
    pub limit: Option<LimitClause>,
}

/// `<order by clause>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderByClause(pub Vec<SortSpecification>);

/// `<sort specification>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpecification {
    /// Sort key.
    pub key: ValueExpression,
    /// Direction.
    pub ordering: OrderingSpecification,
    /// NULL placement.
    pub nulls: Option<NullOrdering>,
}

/// `<ordering specification>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingSpecification {
    /// `ASC`.
    #[default]
    Asc,
    /// `DESC`.
    Desc,
}

impl OrderingSpecification {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `<null ordering>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// `NULLS FIRST`.
    First,
    /// `NULLS LAST`.
    Last,
}

impl NullOrdering {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// `LIMIT <count> [OFFSET <offset>]`. Both are bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    /// Maximum number of rows.
    pub count: UnsignedNumericLiteral,
    /// Rows to skip.
    pub offset: Option<UnsignedNumericLiteral>,
}

impl SortSpecification {
    /// Creates an ascending sort on `key`.
    #[must_use]
    pub const fn new(key: ValueExpression) -> Self {
        Self {
            key,
            ordering: OrderingSpecification::Asc,
            nulls: None,
        }
    }

    /// Sets the direction to `ASC`.
    #[must_use]
    pub const fn asc(mut self) -> Self {
        self.ordering = OrderingSpecification::Asc;
        self
    }

    /// Sets the direction to `DESC`.
    #[must_use]
    pub const fn desc(mut self) -> Self {
        self.ordering = OrderingSpecification::Desc;
        self
    }

    /// Sorts NULLs before other values.
    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    /// Sorts NULLs after other values.
    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }
}

impl SelectStatement {
    /// Returns the underlying query specification.
    #[must_use]
    pub const fn query(&self) -> &QuerySpecification {
        match self {
            Self::Query(query) => query,
            Self::Cursor(cursor) => &cursor.query,
        }
    }

    /// Returns the underlying query specification mutably.
    pub fn query_mut(&mut self) -> &mut QuerySpecification {
        match self {
            Self::Query(query) => query,
            Self::Cursor(cursor) => &mut cursor.query,
        }
    }

    /// Returns the cursor, upgrading a bare query in place first.
    pub fn cursor_mut(&mut self) -> &mut CursorSpecification {
        if let Self::Query(query) = self {
            *self = Self::Cursor(CursorSpecification {
                query: std::mem::take(query),
                order_by: None,
                limit: None,
            });
        }
        match self {
            Self::Cursor(cursor) => cursor,
            Self::Query(_) => unreachable!("query was upgraded to a cursor above"),
        }
    }
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self::Query(QuerySpecification::default())
    }
}

impl From<QuerySpecification> for SelectStatement {
    fn from(query: QuerySpecification) -> Self {
        Self::Query(query)
    }
}

impl Walk for SelectStatement {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Query(query) => query.walk(visitor),
            Self::Cursor(cursor) => cursor.walk(visitor),
        }
    }
}

impl Walk for CursorSpecification {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.query.walk(visitor);
        if let Some(order_by) = &self.order_by {
            order_by.0.walk(visitor);
        }
        self.limit.walk(visitor);
    }
}

impl Walk for SortSpecification {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.key.walk(visitor);
    }
}

impl Walk for LimitClause {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.count.walk(visitor);
        self.offset.walk(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::SetQuantifier;

    #[test]
    fn test_cursor_upgrade_keeps_query() {
        let mut statement = SelectStatement::default();
        statement.query_mut().quantifier = Some(SetQuantifier::Distinct);
        statement.cursor_mut().limit = Some(LimitClause {
            count: UnsignedNumericLiteral::new(1),
            offset: None,
        });
        assert!(matches!(statement, SelectStatement::Cursor(_)));
        assert!(statement.query().quantifier.is_some());

        // A second upgrade is a no-op.
        statement.cursor_mut();
        assert!(matches!(&statement, SelectStatement::Cursor(c) if c.limit.is_some()));
    }
}
