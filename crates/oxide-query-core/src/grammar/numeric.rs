//! Numeric value expressions.

use super::string::{CharacterValueExpression, StringValueExpression};
use super::value::{
    CommonValueExpression, NonparenthesizedValueExpressionPrimary, ValueExpression,
    ValueExpressionPrimary,
};
use super::{Visitor, Walk};

/// `<numeric value expression>`: left-deep `+` / `-` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValueExpression {
    /// A single term.
    Term(Term),
    /// `<left> + <right>`.
    Add(Box<NumericValueExpression>, Term),
    /// `<left> - <right>`.
    Subtract(Box<NumericValueExpression>, Term),
}

/// `<term>`: left-deep `*` / `/` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A single factor.
    Factor(Factor),
    /// `<left> * <right>`.
    Multiply(Box<Term>, Factor),
    /// `<left> / <right>`.
    Divide(Box<Term>, Factor),
}

/// `<sign>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`.
    Plus,
    /// `-`.
    Minus,
}

/// `<factor>`: an optionally signed numeric primary.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    /// Unary sign.
    pub sign: Option<Sign>,
    /// Operand.
    pub primary: NumericPrimary,
}

/// `<numeric primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericPrimary {
    /// A value expression primary.
    Value(ValueExpressionPrimary),
    /// A numeric value function.
    Function(Box<NumericValueFunction>),
}

/// `<numeric value function>`, restricted to the length functions.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValueFunction {
    /// `CHAR_LENGTH(<character value expression>)`.
    CharLength(CharacterValueExpression),
    /// `OCTET_LENGTH(<string value expression>)`.
    OctetLength(StringValueExpression),
}

impl NumericValueExpression {
    /// Returns the expression as a single term, parenthesizing it when it
    /// is an addition or subtraction.
    #[must_use]
    pub fn into_term(self) -> Term {
        match self {
            Self::Term(term) => term,
            expr @ (Self::Add(..) | Self::Subtract(..)) => Term::Factor(parenthesized(expr)),
        }
    }
}

impl Term {
    /// Returns the term as a single factor, parenthesizing products.
    #[must_use]
    pub fn into_factor(self) -> Factor {
        match self {
            Self::Factor(factor) => factor,
            term @ (Self::Multiply(..) | Self::Divide(..)) => {
                parenthesized(NumericValueExpression::Term(term))
            }
        }
    }
}

fn parenthesized(expr: NumericValueExpression) -> Factor {
    Factor::from(NumericPrimary::Value(ValueExpressionPrimary::Parenthesized(
        Box::new(ValueExpression::Common(CommonValueExpression::Numeric(expr))),
    )))
}

impl From<NumericPrimary> for Factor {
    fn from(primary: NumericPrimary) -> Self {
        Self {
            sign: None,
            primary,
        }
    }
}

impl From<Factor> for Term {
    fn from(factor: Factor) -> Self {
        Self::Factor(factor)
    }
}

impl From<Term> for NumericValueExpression {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<Factor> for NumericValueExpression {
    fn from(factor: Factor) -> Self {
        Self::Term(Term::Factor(factor))
    }
}

impl From<NumericPrimary> for NumericValueExpression {
    fn from(primary: NumericPrimary) -> Self {
        Self::from(Factor::from(primary))
    }
}

impl From<NumericValueFunction> for NumericPrimary {
    fn from(function: NumericValueFunction) -> Self {
        Self::Function(Box::new(function))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for NumericPrimary {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::Value(ValueExpressionPrimary::NonParenthesized(primary))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for NumericValueExpression {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::from(NumericPrimary::from(primary))
    }
}

impl Walk for NumericValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Term(term) => term.walk(visitor),
            Self::Add(left, right) | Self::Subtract(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for Term {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Factor(factor) => factor.walk(visitor),
            Self::Multiply(left, right) | Self::Divide(left, right) => {
                left.walk(visitor);
                right.walk(visitor);
            }
        }
    }
}

impl Walk for Factor {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.primary.walk(visitor);
    }
}

impl Walk for NumericPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Value(value) => value.walk(visitor),
            Self::Function(function) => function.walk(visitor),
        }
    }
}

impl Walk for NumericValueFunction {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::CharLength(expr) => expr.walk(visitor),
            Self::OctetLength(expr) => expr.walk(visitor),
        }
    }
}
