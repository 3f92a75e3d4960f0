//! Aggregate (set) functions.

use super::value::ValueExpression;
use super::{Visitor, Walk};

/// `<set function specification>`.
#[derive(Debug, Clone, PartialEq)]
pub enum SetFunctionSpecification {
    /// `COUNT(*)`.
    CountStar,
    /// Any other aggregate.
    General(GeneralSetFunction),
}

/// `<general set function>`: `<kind>([<quantifier>] <value>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSetFunction {
    /// Aggregate kind.
    pub kind: SetFunctionType,
    /// `DISTINCT` or `ALL`.
    pub quantifier: Option<SetQuantifier>,
    /// Aggregated expression.
    pub value: Box<ValueExpression>,
}

/// `<computational operation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFunctionType {
    /// `AVG`.
    Avg,
    /// `MAX`.
    Max,
    /// `MIN`.
    Min,
    /// `SUM`.
    Sum,
    /// `COUNT`.
    Count,
}

impl SetFunctionType {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::Count => "COUNT",
        }
    }
}

/// `<set quantifier>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    /// `DISTINCT`.
    Distinct,
    /// `ALL`.
    All,
}

impl SetQuantifier {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
        }
    }
}

impl Walk for SetFunctionSpecification {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::CountStar => {}
            Self::General(function) => function.value.walk(visitor),
        }
    }
}
