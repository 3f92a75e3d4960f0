//! Query specifications and table references.

use super::boolean::BooleanValueExpression;
use super::identifier::{ColumnReference, Identifier, TableName};
use super::set_function::SetQuantifier;
use super::value::{Subquery, ValueExpression};
use super::{Visitor, Walk};

/// `<query specification>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpecification {
    /// `DISTINCT` / `ALL`.
    pub quantifier: Option<SetQuantifier>,
    /// Projected columns.
    pub select_list: SelectList,
    /// FROM, WHERE, GROUP BY and HAVING.
    pub table_expression: TableExpression,
}

/// `<select list>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectList(pub Vec<DerivedColumn>);

/// `<derived column>`: `<value> [AS <alias>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    /// Projected value.
    pub value: ValueExpression,
    /// Output name.
    pub alias: Option<Identifier>,
}

/// `<table expression>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableExpression {
    /// FROM list; empty for a literal-only SELECT.
    pub from: FromClause,
    /// WHERE condition.
    pub where_clause: Option<BooleanValueExpression>,
    /// GROUP BY list.
    pub group_by: Option<GroupByClause>,
    /// HAVING condition.
    pub having: Option<BooleanValueExpression>,
}

/// `<from clause>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FromClause(pub Vec<TableReference>);

/// `<group by clause>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupByClause(pub Vec<OrdinaryGroupingSet>);

/// `<ordinary grouping set>`, restricted to a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinaryGroupingSet(pub ColumnReference);

/// `<table reference>`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableReference {
    /// A table or derived table.
    Primary(TablePrimary),
    /// A join.
    Joined(Box<JoinedTable>),
}

/// `<table primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum TablePrimary {
    /// `<name> [AS <correlation>]`.
    Table {
        /// Table name.
        name: TableName,
        /// Correlation name.
        correlation: Option<Identifier>,
    },
    /// `(<subquery>) AS <correlation>`.
    Derived {
        /// Inner query.
        subquery: Subquery,
        /// Correlation name.
        correlation: Identifier,
    },
}

/// `<join type>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// `JOIN`.
    Inner,
    /// `LEFT JOIN`.
    LeftOuter,
    /// `RIGHT JOIN`.
    RightOuter,
    /// `FULL JOIN`.
    FullOuter,
}

impl JoinType {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::LeftOuter => "LEFT JOIN",
            Self::RightOuter => "RIGHT JOIN",
            Self::FullOuter => "FULL JOIN",
        }
    }
}

/// `<joined table>`.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinedTable {
    /// `<left> CROSS JOIN <right>`.
    Cross {
        /// Left side.
        left: TableReference,
        /// Right side.
        right: TablePrimary,
    },
    /// `<left> <kind> <right> ON <condition>`.
    Qualified {
        /// Left side.
        left: TableReference,
        /// Join kind.
        kind: JoinType,
        /// Right side.
        right: TableReference,
        /// ON condition.
        condition: BooleanValueExpression,
    },
    /// `<left> NATURAL JOIN <right>`.
    Natural {
        /// Left side.
        left: TableReference,
        /// Right side.
        right: TablePrimary,
    },
    /// `<left> UNION JOIN <right>`.
    Union {
        /// Left side.
        left: TableReference,
        /// Right side.
        right: TablePrimary,
    },
}

impl QuerySpecification {
    /// Returns the FROM list.
    #[must_use]
    pub fn from_list(&self) -> &[TableReference] {
        &self.table_expression.from.0
    }

    /// ANDs `condition` into the WHERE clause.
    pub fn add_where(&mut self, condition: BooleanValueExpression) {
        let slot = &mut self.table_expression.where_clause;
        *slot = Some(match slot.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
    }

    /// ANDs `condition` into the HAVING clause.
    pub fn add_having(&mut self, condition: BooleanValueExpression) {
        let slot = &mut self.table_expression.having;
        *slot = Some(match slot.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
    }
}

impl From<TablePrimary> for TableReference {
    fn from(primary: TablePrimary) -> Self {
        Self::Primary(primary)
    }
}

impl From<JoinedTable> for TableReference {
    fn from(joined: JoinedTable) -> Self {
        Self::Joined(Box::new(joined))
    }
}

impl Walk for QuerySpecification {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.select_list.walk(visitor);
        self.table_expression.walk(visitor);
    }
}

impl Walk for SelectList {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.0.walk(visitor);
    }
}

impl Walk for DerivedColumn {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.value.walk(visitor);
    }
}

impl Walk for TableExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.from.0.walk(visitor);
        self.where_clause.walk(visitor);
        if let Some(group_by) = &self.group_by {
            for set in &group_by.0 {
                set.0.walk(visitor);
            }
        }
        self.having.walk(visitor);
    }
}

impl Walk for TableReference {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Primary(primary) => primary.walk(visitor),
            Self::Joined(joined) => joined.walk(visitor),
        }
    }
}

impl Walk for TablePrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Table { .. } => {}
            Self::Derived { subquery, .. } => subquery.walk(visitor),
        }
    }
}

impl Walk for JoinedTable {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Cross { left, right }
            | Self::Natural { left, right }
            | Self::Union { left, right } => {
                left.walk(visitor);
                right.walk(visitor);
            }
            Self::Qualified {
                left,
                right,
                condition,
                ..
            } => {
                left.walk(visitor);
                right.walk(visitor);
                condition.walk(visitor);
            }
        }
    }
}
