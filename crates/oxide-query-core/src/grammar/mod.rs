//! ANSI SQL:2003 grammar nodes.
//!
//! Every production the composer can build is a closed Rust type named after
//! the standard's nonterminal. Nodes carry data only; rendering lives in
//! [`crate::builder`] and the single structural traversal lives here.
//!
//! The traversal visits bound values and column references in exactly the
//! order the builder emits them, which is what keeps the placeholder count
//! and the argument vector in lockstep.

mod boolean;
mod cursor;
mod datetime;
mod identifier;
mod literal;
mod numeric;
mod predicate;
mod query;
mod set_function;
mod statement;
mod string;
mod value;

use std::collections::BTreeSet;

pub use boolean::{
    BooleanFactor, BooleanPredicand, BooleanPrimary, BooleanTerm, BooleanTest,
    BooleanValueExpression, TruthTest, TruthValue,
};
pub use cursor::{
    CursorSpecification, LimitClause, NullOrdering, OrderByClause, OrderingSpecification,
    SelectStatement, SortSpecification,
};
pub use datetime::DatetimeValueFunction;
pub use identifier::{ColumnReference, Identifier, IdentifierChain, TableName};
pub use literal::{
    GeneralLiteral, SignedNumericLiteral, UnsignedLiteral, UnsignedNumericLiteral,
    UnsignedValueSpecification,
};
pub use numeric::{Factor, NumericPrimary, NumericValueExpression, NumericValueFunction, Sign, Term};
pub use predicate::{CompOp, InPredicateValue, Predicate};
pub use query::{
    DerivedColumn, FromClause, GroupByClause, JoinType, JoinedTable, OrdinaryGroupingSet,
    QuerySpecification, SelectList, TableExpression, TablePrimary, TableReference,
};
pub use set_function::{
    GeneralSetFunction, SetFunctionSpecification, SetFunctionType, SetQuantifier,
};
pub use statement::{
    DeleteStatementSearched, InsertStatement, SetClause, Statement, UpdateStatementSearched,
};
pub use string::{
    BlobPrimary, BlobValueExpression, CharLengthUnits, CharacterFactor, CharacterPrimary,
    CharacterValueExpression, CharacterValueFunction, FoldCase, StringValueExpression,
    TrimSpecification,
};
pub use value::{
    CommonValueExpression, NonparenthesizedValueExpressionPrimary, RowValuePredicand, Subquery,
    ValueExpression, ValueExpressionPrimary,
};

use crate::value::SqlValue;

/// Callbacks invoked by [`Walk`] for the leaves that matter to callers.
pub trait Visitor {
    /// Called once per placeholder, in emission order.
    fn bound_value(&mut self, _value: &SqlValue) {}

    /// Called once per column reference, in emission order.
    fn column_reference(&mut self, _column: &ColumnReference) {}
}

/// Structural traversal over grammar nodes.
pub trait Walk {
    /// Visits every leaf of `self` in emission order.
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

impl<T: Walk + ?Sized> Walk for &T {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        (**self).walk(visitor);
    }
}

impl<T: Walk + ?Sized> Walk for Box<T> {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        (**self).walk(visitor);
    }
}

impl<T: Walk> Walk for Option<T> {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(node) = self {
            node.walk(visitor);
        }
    }
}

impl<T: Walk> Walk for [T] {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for node in self {
            node.walk(visitor);
        }
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.as_slice().walk(visitor);
    }
}

impl Walk for SqlValue {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.bound_value(self);
    }
}

#[derive(Default)]
struct ArgCounter(usize);

impl Visitor for ArgCounter {
    fn bound_value(&mut self, _value: &SqlValue) {
        self.0 += 1;
    }
}

#[derive(Default)]
struct RelationCollector(BTreeSet<String>);

impl Visitor for RelationCollector {
    fn column_reference(&mut self, column: &ColumnReference) {
        if let Some(qualifier) = column.qualifier() {
            self.0.insert(String::from(qualifier));
        }
    }
}

/// Returns the number of placeholders `node` renders.
#[must_use]
pub fn arg_count<N: Walk + ?Sized>(node: &N) -> usize {
    let mut counter = ArgCounter::default();
    node.walk(&mut counter);
    counter.0
}

/// Returns the effective names of every relation a column reference inside
/// `node` is qualified with.
#[must_use]
pub fn referenced_relations<N: Walk + ?Sized>(node: &N) -> BTreeSet<String> {
    let mut collector = RelationCollector::default();
    node.walk(&mut collector);
    collector.0
}

/// Collects bound values in traversal order.
#[must_use]
pub fn bound_values<N: Walk + ?Sized>(node: &N) -> Vec<SqlValue> {
    struct Collector(Vec<SqlValue>);

    impl Visitor for Collector {
        fn bound_value(&mut self, value: &SqlValue) {
            self.0.push(value.clone());
        }
    }

    let mut collector = Collector(Vec::new());
    node.walk(&mut collector);
    collector.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: SqlValue) -> NonparenthesizedValueExpressionPrimary {
        NonparenthesizedValueExpressionPrimary::UnsignedValue(GeneralLiteral(value).into())
    }

    fn column(relation: &str, name: &str) -> NonparenthesizedValueExpressionPrimary {
        NonparenthesizedValueExpressionPrimary::ColumnReference(ColumnReference::qualified(
            relation, name,
        ))
    }

    #[test]
    fn test_arg_count_literals_only() {
        let predicate = Predicate::Between {
            target: RowValuePredicand::Primary(column("users", "id")),
            negated: false,
            start: RowValuePredicand::Primary(literal(SqlValue::Int(1))),
            end: RowValuePredicand::Primary(literal(SqlValue::Int(5))),
        };
        assert_eq!(arg_count(&predicate), 2);
        assert_eq!(
            bound_values(&predicate),
            vec![SqlValue::Int(1), SqlValue::Int(5)]
        );
    }

    #[test]
    fn test_referenced_relations() {
        let predicate = Predicate::Comparison {
            left: RowValuePredicand::Primary(column("articles", "author")),
            op: CompOp::Equals,
            right: RowValuePredicand::Primary(column("users", "id")),
        };
        let names: Vec<_> = referenced_relations(&predicate).into_iter().collect();
        assert_eq!(names, vec!["articles", "users"]);
    }

    #[test]
    fn test_limit_counts_offset() {
        let limit = LimitClause {
            count: UnsignedNumericLiteral::new(10),
            offset: Some(UnsignedNumericLiteral::new(20)),
        };
        assert_eq!(arg_count(&limit), 2);
        let limit = LimitClause {
            count: UnsignedNumericLiteral::new(10),
            offset: None,
        };
        assert_eq!(arg_count(&limit), 1);
    }

    #[test]
    fn test_insert_counts_values() {
        let insert = InsertStatement {
            table: TableName::new("users"),
            columns: vec![Identifier::new("id"), Identifier::new("name")],
            values: vec![SqlValue::UInt(1), SqlValue::Text(String::from("foo"))],
        };
        assert_eq!(arg_count(&insert), 2);
    }
}
