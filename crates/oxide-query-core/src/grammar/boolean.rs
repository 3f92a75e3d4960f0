//! Boolean value expressions.
//!
//! `OR` chains are left-deep [`BooleanValueExpression`]s of AND-chained
//! [`BooleanTerm`]s, so `a AND b OR c` has exactly one shape and the builder
//! never has to guess precedence.

use super::predicate::Predicate;
use super::value::NonparenthesizedValueExpressionPrimary;
use super::{Visitor, Walk};

/// `<boolean value expression>`.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanValueExpression {
    /// A single term.
    Term(BooleanTerm),
    /// `<left> OR <right>`.
    Or(Box<BooleanValueExpression>, BooleanTerm),
}

/// `<boolean term>`.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanTerm {
    /// A single factor.
    Factor(BooleanFactor),
    /// `<left> AND <right>`.
    And(Box<BooleanTerm>, BooleanFactor),
}

/// `<boolean factor>`: `[NOT] <boolean test>`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanFactor {
    /// Whether `NOT` prefixes the test.
    pub negated: bool,
    /// Operand.
    pub test: BooleanTest,
}

/// `<boolean test>`: `<boolean primary> [IS [NOT] <truth value>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanTest {
    /// Operand.
    pub primary: BooleanPrimary,
    /// Optional truth test.
    pub truth: Option<TruthTest>,
}

/// `IS [NOT] <truth value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTest {
    /// Whether `NOT` follows `IS`.
    pub negated: bool,
    /// Value tested against.
    pub value: TruthValue,
}

/// `<truth value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthValue {
    /// `TRUE`.
    True,
    /// `FALSE`.
    False,
    /// `UNKNOWN`.
    Unknown,
}

impl TruthValue {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// `<boolean primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanPrimary {
    /// A predicate.
    Predicate(Box<Predicate>),
    /// A boolean predicand.
    Predicand(BooleanPredicand),
}

/// `<boolean predicand>`.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanPredicand {
    /// `( <boolean value expression> )`.
    Parenthesized(Box<BooleanValueExpression>),
    /// A column, literal or subquery used as a boolean.
    Primary(NonparenthesizedValueExpressionPrimary),
}

impl BooleanValueExpression {
    /// Returns `self OR right`.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        Self::Or(Box::new(self), right.into_term())
    }

    /// Returns `self AND right`, keeping the AND chain left-deep.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        Self::Term(self.into_term().and(right.into_term()))
    }

    /// Returns the expression as a single term, parenthesizing an OR.
    #[must_use]
    pub fn into_term(self) -> BooleanTerm {
        match self {
            Self::Term(term) => term,
            expr @ Self::Or(..) => BooleanTerm::Factor(BooleanFactor::from(BooleanPrimary::Predicand(
                BooleanPredicand::Parenthesized(Box::new(expr)),
            ))),
        }
    }

    /// Returns the expression as a single factor, parenthesizing compound
    /// expressions.
    #[must_use]
    pub fn into_factor(self) -> BooleanFactor {
        match self {
            Self::Term(BooleanTerm::Factor(factor)) => factor,
            expr => BooleanFactor::from(BooleanPrimary::Predicand(
                BooleanPredicand::Parenthesized(Box::new(expr)),
            )),
        }
    }
}

impl BooleanTerm {
    /// Appends every factor of `right` to this AND chain.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        match right {
            Self::Factor(factor) => Self::And(Box::new(self), factor),
            Self::And(rest, factor) => Self::And(Box::new(self.and(*rest)), factor),
        }
    }
}

impl From<BooleanPrimary> for BooleanFactor {
    fn from(primary: BooleanPrimary) -> Self {
        Self {
            negated: false,
            test: BooleanTest {
                primary,
                truth: None,
            },
        }
    }
}

impl From<Predicate> for BooleanPrimary {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(Box::new(predicate))
    }
}

impl From<BooleanFactor> for BooleanTerm {
    fn from(factor: BooleanFactor) -> Self {
        Self::Factor(factor)
    }
}

impl From<BooleanTerm> for BooleanValueExpression {
    fn from(term: BooleanTerm) -> Self {
        Self::Term(term)
    }
}

impl From<BooleanFactor> for BooleanValueExpression {
    fn from(factor: BooleanFactor) -> Self {
        Self::Term(BooleanTerm::Factor(factor))
    }
}

impl From<BooleanPrimary> for BooleanValueExpression {
    fn from(primary: BooleanPrimary) -> Self {
        Self::from(BooleanFactor::from(primary))
    }
}

impl From<Predicate> for BooleanValueExpression {
    fn from(predicate: Predicate) -> Self {
        Self::from(BooleanPrimary::from(predicate))
    }
}

impl From<BooleanPredicand> for BooleanValueExpression {
    fn from(predicand: BooleanPredicand) -> Self {
        match predicand {
            BooleanPredicand::Parenthesized(expr) => *expr,
            predicand @ BooleanPredicand::Primary(_) => {
                Self::from(BooleanPrimary::Predicand(predicand))
            }
        }
    }
}

impl Walk for BooleanValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Term(term) => term.walk(visitor),
            Self::Or(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for BooleanTerm {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Factor(factor) => factor.walk(visitor),
            Self::And(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for BooleanFactor {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.test.primary.walk(visitor);
    }
}

impl Walk for BooleanPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Predicate(predicate) => predicate.walk(visitor),
            Self::Predicand(predicand) => predicand.walk(visitor),
        }
    }
}

impl Walk for BooleanPredicand {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Parenthesized(expr) => expr.walk(visitor),
            Self::Primary(primary) => primary.walk(visitor),
        }
    }
}
