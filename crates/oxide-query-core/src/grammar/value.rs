//! Value expressions, primaries and row value predicands.

use super::boolean::{BooleanPredicand, BooleanValueExpression};
use super::cursor::SelectStatement;
use super::datetime::DatetimeValueFunction;
use super::identifier::ColumnReference;
use super::literal::{SignedNumericLiteral, UnsignedValueSpecification};
use super::numeric::{Factor, NumericPrimary, NumericValueExpression, Term};
use super::set_function::SetFunctionSpecification;
use super::string::{CharacterValueExpression, StringValueExpression};
use super::{Visitor, Walk};

/// `<value expression>`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpression {
    /// Numeric, string or datetime expression.
    Common(CommonValueExpression),
    /// Boolean expression.
    Boolean(Box<BooleanValueExpression>),
}

/// `<common value expression>`.
#[derive(Debug, Clone, PartialEq)]
pub enum CommonValueExpression {
    /// Numeric expression.
    Numeric(NumericValueExpression),
    /// Character or blob expression.
    String(StringValueExpression),
    /// Datetime expression.
    Datetime(DatetimeValueFunction),
}

/// `<value expression primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpressionPrimary {
    /// `( <value expression> )`.
    Parenthesized(Box<ValueExpression>),
    /// Everything that needs no parentheses.
    NonParenthesized(NonparenthesizedValueExpressionPrimary),
}

/// `<nonparenthesized value expression primary>`.
#[derive(Debug, Clone, PartialEq)]
pub enum NonparenthesizedValueExpressionPrimary {
    /// Unsigned literal.
    UnsignedValue(UnsignedValueSpecification),
    /// Signed numeric literal (negative integers and floats).
    SignedLiteral(SignedNumericLiteral),
    /// Column reference.
    ColumnReference(ColumnReference),
    /// Aggregate function.
    SetFunction(SetFunctionSpecification),
    /// Scalar subquery.
    ScalarSubquery(Subquery),
}

/// `<row value predicand>`: an operand of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValuePredicand {
    /// A primary that needs no parentheses.
    Primary(NonparenthesizedValueExpressionPrimary),
    /// Numeric, string or datetime expression.
    Common(CommonValueExpression),
    /// Boolean predicand.
    Boolean(BooleanPredicand),
}

/// `<subquery>`: a parenthesized query used as a value or relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery(pub Box<SelectStatement>);

impl ValueExpression {
    /// Returns the primary if the expression is nothing but a
    /// non-parenthesized primary wrapped in trivial productions.
    #[must_use]
    pub fn as_primary(&self) -> Option<&NonparenthesizedValueExpressionPrimary> {
        match self {
            Self::Common(common) => common.as_primary(),
            Self::Boolean(_) => None,
        }
    }
}

impl CommonValueExpression {
    /// See [`ValueExpression::as_primary`].
    #[must_use]
    pub fn as_primary(&self) -> Option<&NonparenthesizedValueExpressionPrimary> {
        let value = match self {
            Self::Numeric(NumericValueExpression::Term(Term::Factor(Factor {
                sign: None,
                primary: NumericPrimary::Value(value),
            }))) => value,
            Self::String(StringValueExpression::Character(CharacterValueExpression::Factor(
                factor,
            ))) => factor.as_value()?,
            _ => return None,
        };
        match value {
            ValueExpressionPrimary::NonParenthesized(primary) => Some(primary),
            ValueExpressionPrimary::Parenthesized(_) => None,
        }
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for ValueExpressionPrimary {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::NonParenthesized(primary)
    }
}

impl From<NumericValueExpression> for CommonValueExpression {
    fn from(expr: NumericValueExpression) -> Self {
        Self::Numeric(expr)
    }
}

impl From<StringValueExpression> for CommonValueExpression {
    fn from(expr: StringValueExpression) -> Self {
        Self::String(expr)
    }
}

impl From<CharacterValueExpression> for CommonValueExpression {
    fn from(expr: CharacterValueExpression) -> Self {
        Self::String(StringValueExpression::Character(expr))
    }
}

impl From<CommonValueExpression> for ValueExpression {
    fn from(expr: CommonValueExpression) -> Self {
        Self::Common(expr)
    }
}

impl From<BooleanValueExpression> for ValueExpression {
    fn from(expr: BooleanValueExpression) -> Self {
        Self::Boolean(Box::new(expr))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for CommonValueExpression {
    /// Untyped primaries (columns, literals, subqueries) travel through the
    /// numeric chain; the rendered text is the same for every chain.
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::Numeric(NumericValueExpression::from(primary))
    }
}

impl From<NonparenthesizedValueExpressionPrimary> for ValueExpression {
    fn from(primary: NonparenthesizedValueExpressionPrimary) -> Self {
        Self::Common(CommonValueExpression::from(primary))
    }
}

impl Walk for ValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Common(expr) => expr.walk(visitor),
            Self::Boolean(expr) => expr.walk(visitor),
        }
    }
}

impl Walk for CommonValueExpression {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Numeric(expr) => expr.walk(visitor),
            Self::String(expr) => expr.walk(visitor),
            Self::Datetime(expr) => expr.walk(visitor),
        }
    }
}

impl Walk for ValueExpressionPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Parenthesized(expr) => expr.walk(visitor),
            Self::NonParenthesized(primary) => primary.walk(visitor),
        }
    }
}

impl Walk for NonparenthesizedValueExpressionPrimary {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::UnsignedValue(value) => value.walk(visitor),
            Self::SignedLiteral(literal) => literal.walk(visitor),
            Self::ColumnReference(column) => column.walk(visitor),
            Self::SetFunction(function) => function.walk(visitor),
            Self::ScalarSubquery(subquery) => subquery.walk(visitor),
        }
    }
}

impl Walk for RowValuePredicand {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Primary(primary) => primary.walk(visitor),
            Self::Common(expr) => expr.walk(visitor),
            Self::Boolean(predicand) => predicand.walk(visitor),
        }
    }
}

impl Walk for Subquery {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.0.walk(visitor);
    }
}
