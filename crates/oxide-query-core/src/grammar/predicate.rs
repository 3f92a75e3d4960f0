//! Predicates.

use super::value::{RowValuePredicand, Subquery};
use super::{Visitor, Walk};

/// `<comp op>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    /// `=`.
    Equals,
    /// `<>`.
    NotEquals,
    /// `<`.
    LessThan,
    /// `<=`.
    LessThanOrEquals,
    /// `>`.
    GreaterThan,
    /// `>=`.
    GreaterThanOrEquals,
}

impl CompOp {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEquals => ">=",
        }
    }
}

/// `<predicate>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `<left> <op> <right>`.
    Comparison {
        /// Left operand.
        left: RowValuePredicand,
        /// Operator.
        op: CompOp,
        /// Right operand.
        right: RowValuePredicand,
    },
    /// `<target> [NOT] BETWEEN <start> AND <end>`.
    Between {
        /// Tested value.
        target: RowValuePredicand,
        /// `NOT BETWEEN`.
        negated: bool,
        /// Lower bound.
        start: RowValuePredicand,
        /// Upper bound.
        end: RowValuePredicand,
    },
    /// `<target> [NOT] IN (<values>)`.
    In {
        /// Tested value.
        target: RowValuePredicand,
        /// `NOT IN`.
        negated: bool,
        /// Candidates.
        values: InPredicateValue,
    },
    /// `<target> IS [NOT] NULL`.
    Null {
        /// Tested value.
        target: RowValuePredicand,
        /// `IS NOT NULL`.
        negated: bool,
    },
}

/// `<in predicate value>`.
#[derive(Debug, Clone, PartialEq)]
pub enum InPredicateValue {
    /// `(<v1>, <v2>, ...)`.
    List(Vec<RowValuePredicand>),
    /// `(<subquery>)`.
    Subquery(Subquery),
}

impl Walk for Predicate {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Comparison { left, right, .. } => {
                left.walk(visitor);
                right.walk(visitor);
            }
            Self::Between {
                target, start, end, ..
            } => {
                target.walk(visitor);
                start.walk(visitor);
                end.walk(visitor);
            }
            Self::In { target, values, .. } => {
                target.walk(visitor);
                values.walk(visitor);
            }
            Self::Null { target, .. } => target.walk(visitor),
        }
    }
}

impl Walk for InPredicateValue {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::List(values) => values.walk(visitor),
            Self::Subquery(subquery) => subquery.walk(visitor),
        }
    }
}
