//! Projections: anything that can appear in a select list.

use super::column::Column;
use super::relation::Relation;
use crate::grammar::{
    CharacterValueExpression, CommonValueExpression, DatetimeValueFunction, DerivedColumn,
    Identifier, NonparenthesizedValueExpressionPrimary, NumericValueExpression,
    SelectStatement, SetFunctionSpecification, SortSpecification, Subquery, ValueExpression,
};

/// The grammar a function call renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// Aggregate.
    Set(SetFunctionSpecification),
    /// Numeric function or arithmetic.
    Numeric(NumericValueExpression),
    /// String function or concatenation.
    Character(CharacterValueExpression),
    /// Datetime function.
    Datetime(DatetimeValueFunction),
}

impl FunctionBody {
    /// Returns the body as a value expression.
    #[must_use]
    pub fn value_expression(&self) -> ValueExpression {
        let common = match self {
            Self::Set(function) => CommonValueExpression::from(
                NonparenthesizedValueExpressionPrimary::SetFunction(function.clone()),
            ),
            Self::Numeric(expr) => CommonValueExpression::Numeric(expr.clone()),
            Self::Character(expr) => CommonValueExpression::from(expr.clone()),
            Self::Datetime(function) => CommonValueExpression::Datetime(*function),
        };
        ValueExpression::Common(common)
    }
}

/// A function call used as a value, optionally bound to the relation its
/// arguments come from.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    relation: Option<Relation>,
    kind: &'static str,
    body: FunctionBody,
    alias: Option<String>,
}

impl Function {
    /// Creates a function.
    #[must_use]
    pub const fn new(kind: &'static str, body: FunctionBody, relation: Option<Relation>) -> Self {
        Self {
            relation,
            kind,
            body,
            alias: None,
        }
    }

    /// Returns the lowercase function name (`count`, `substring`, ...).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the grammar body.
    #[must_use]
    pub const fn body(&self) -> &FunctionBody {
        &self.body
    }

    /// Returns the relation the arguments come from.
    #[must_use]
    pub const fn relation(&self) -> Option<&Relation> {
        self.relation.as_ref()
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns the call as a value expression.
    #[must_use]
    pub fn value_expression(&self) -> ValueExpression {
        self.body.value_expression()
    }

    /// Returns the select-list entry.
    #[must_use]
    pub fn derived_column(&self) -> DerivedColumn {
        DerivedColumn {
            value: self.value_expression(),
            alias: self.alias.as_deref().map(Identifier::new),
        }
    }

    /// Returns an ascending sort on the result.
    #[must_use]
    pub fn asc(&self) -> SortSpecification {
        SortSpecification::new(self.value_expression()).asc()
    }

    /// Returns a descending sort on the result.
    #[must_use]
    pub fn desc(&self) -> SortSpecification {
        SortSpecification::new(self.value_expression()).desc()
    }
}

/// A query used as a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSubquery {
    query: SelectStatement,
    alias: Option<String>,
}

impl ScalarSubquery {
    /// Wraps a query.
    #[must_use]
    pub const fn new(query: SelectStatement) -> Self {
        Self { query, alias: None }
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the grammar subquery.
    #[must_use]
    pub fn subquery(&self) -> Subquery {
        Subquery(Box::new(self.query.clone()))
    }

    /// Returns the select-list entry.
    #[must_use]
    pub fn derived_column(&self) -> DerivedColumn {
        DerivedColumn {
            value: ValueExpression::from(NonparenthesizedValueExpressionPrimary::ScalarSubquery(
                self.subquery(),
            )),
            alias: self.alias.as_deref().map(Identifier::new),
        }
    }
}

/// Anything that can appear in a select list.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// A column.
    Column(Column),
    /// A function call.
    Function(Function),
    /// A scalar subquery.
    Subquery(ScalarSubquery),
}

impl Projection {
    /// Returns the output name: the alias, else the column name, else the
    /// function name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Column(column) => column.effective_name(),
            Self::Function(function) => function.alias().unwrap_or(function.kind()),
            Self::Subquery(subquery) => subquery.alias().unwrap_or("subquery"),
        }
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Column(column) => column.alias(),
            Self::Function(function) => function.alias(),
            Self::Subquery(subquery) => subquery.alias(),
        }
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        match self {
            Self::Column(column) => Self::Column(column.as_(alias)),
            Self::Function(function) => Self::Function(function.as_(alias)),
            Self::Subquery(subquery) => Self::Subquery(subquery.as_(alias)),
        }
    }

    /// Returns the relation the projection is bound to.
    #[must_use]
    pub const fn relation(&self) -> Option<&Relation> {
        match self {
            Self::Column(column) => Some(column.relation()),
            Self::Function(function) => function.relation(),
            Self::Subquery(_) => None,
        }
    }

    /// Returns the select-list entry.
    #[must_use]
    pub fn derived_column(&self) -> DerivedColumn {
        match self {
            Self::Column(column) => column.derived_column(),
            Self::Function(function) => function.derived_column(),
            Self::Subquery(subquery) => subquery.derived_column(),
        }
    }
}

impl From<Column> for Projection {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Function> for Projection {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<ScalarSubquery> for Projection {
    fn from(subquery: ScalarSubquery) -> Self {
        Self::Subquery(subquery)
    }
}
