//! Coercion engine.
//!
//! Composer arguments arrive as [`Operand`]s: literals, column and function
//! handles, selections or ready-made grammar nodes. Each function in this
//! module promotes an operand to the grammar node a particular position
//! needs, or reports [`Error::Coercion`] naming the operand and the
//! position.

use std::fmt;

use crate::builder::Builder;
use crate::compose::Selection;
use crate::error::{Error, Result};
use crate::grammar::{
    BlobPrimary, BlobValueExpression, BooleanPredicand, BooleanTerm, BooleanValueExpression,
    CharacterFactor, CharacterPrimary, CharacterValueExpression, ColumnReference,
    CommonValueExpression, Factor, GeneralLiteral, NonparenthesizedValueExpressionPrimary,
    NumericPrimary, NumericValueExpression, Predicate, QuerySpecification, RowValuePredicand,
    SelectStatement, SetFunctionSpecification, SignedNumericLiteral, SortSpecification,
    StringValueExpression, Subquery, Term, UnsignedNumericLiteral, UnsignedValueSpecification,
    ValueExpression, ValueExpressionPrimary,
};
use crate::meta::{Column, DerivedTable, Function, FunctionBody, Relation, ScalarSubquery, Table};
use crate::value::{SqlValue, ToSqlValue};

/// An input to the composer.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A literal, bound as a placeholder.
    Value(SqlValue),
    /// A column handle.
    Column(Column),
    /// A function handle.
    Function(Function),
    /// A scalar subquery.
    Subquery(ScalarSubquery),
    /// A whole selection, used as a derived table or subquery.
    Selection(Box<Selection>),
    /// A table or derived table.
    Relation(Relation),
    /// A predicate.
    Predicate(Predicate),
    /// A sort specification.
    Sort(SortSpecification),
    /// `<row value predicand>`.
    RowValuePredicand(RowValuePredicand),
    /// `<value expression primary>`.
    Primary(ValueExpressionPrimary),
    /// `<nonparenthesized value expression primary>`.
    NonparenthesizedPrimary(NonparenthesizedValueExpressionPrimary),
    /// `<unsigned value specification>`.
    UnsignedValue(UnsignedValueSpecification),
    /// `<column reference>`.
    ColumnReference(ColumnReference),
    /// `<set function specification>`.
    SetFunction(SetFunctionSpecification),
    /// `<query specification>`.
    QuerySpecification(QuerySpecification),
    /// `<value expression>`.
    ValueExpression(ValueExpression),
    /// `<common value expression>`.
    CommonValueExpression(CommonValueExpression),
    /// `<boolean value expression>`.
    BooleanValueExpression(BooleanValueExpression),
    /// `<boolean term>`.
    BooleanTerm(BooleanTerm),
    /// `<boolean predicand>`.
    BooleanPredicand(BooleanPredicand),
    /// `<character value expression>`.
    CharacterValueExpression(CharacterValueExpression),
    /// `<character factor>`.
    CharacterFactor(CharacterFactor),
    /// `<character primary>`.
    CharacterPrimary(CharacterPrimary),
    /// `<numeric value expression>`.
    NumericValueExpression(NumericValueExpression),
    /// `<term>`.
    Term(Term),
    /// `<factor>`.
    Factor(Factor),
    /// `<numeric primary>`.
    NumericPrimary(NumericPrimary),
}

impl Operand {
    /// Returns a short name of the operand kind, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value.kind(),
            Self::Column(_) => "column",
            Self::Function(_) => "function",
            Self::Subquery(_) => "scalar subquery",
            Self::Selection(_) => "selection",
            Self::Relation(_) => "relation",
            Self::Predicate(_) => "predicate",
            Self::Sort(_) => "sort specification",
            Self::RowValuePredicand(_) => "row value predicand",
            Self::Primary(_) => "value expression primary",
            Self::NonparenthesizedPrimary(_) => "nonparenthesized value expression primary",
            Self::UnsignedValue(_) => "unsigned value specification",
            Self::ColumnReference(_) => "column reference",
            Self::SetFunction(_) => "set function specification",
            Self::QuerySpecification(_) => "query specification",
            Self::ValueExpression(_) => "value expression",
            Self::CommonValueExpression(_) => "common value expression",
            Self::BooleanValueExpression(_) => "boolean value expression",
            Self::BooleanTerm(_) => "boolean term",
            Self::BooleanPredicand(_) => "boolean predicand",
            Self::CharacterValueExpression(_) => "character value expression",
            Self::CharacterFactor(_) => "character factor",
            Self::CharacterPrimary(_) => "character primary",
            Self::NumericValueExpression(_) => "numeric value expression",
            Self::Term(_) => "term",
            Self::Factor(_) => "factor",
            Self::NumericPrimary(_) => "numeric primary",
        }
    }

    /// Returns the relation a column or function operand is bound to.
    #[must_use]
    pub fn relation(&self) -> Option<&Relation> {
        match self {
            Self::Column(column) => Some(column.relation()),
            Self::Function(function) => function.relation(),
            _ => None,
        }
    }

    pub(crate) fn reject(&self, target: &'static str) -> Error {
        Error::Coercion {
            type_name: self.type_name(),
            value: self.to_string(),
            target,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let builder = Builder::new();
        let text = match self {
            Self::Value(value) => value.to_sql_inline(),
            Self::Column(column) => builder.string(&column.column_reference()),
            Self::Function(function) => builder.string(&function.value_expression()),
            Self::Subquery(subquery) => builder.string(&subquery.subquery()),
            Self::Selection(selection) => builder.string(selection.statement()),
            Self::Relation(relation) => relation.to_string(),
            Self::Predicate(predicate) => builder.string(predicate),
            Self::Sort(sort) => builder.string(sort),
            Self::RowValuePredicand(node) => builder.string(node),
            Self::Primary(node) => builder.string(node),
            Self::NonparenthesizedPrimary(node) => builder.string(node),
            Self::UnsignedValue(node) => builder.string(node),
            Self::ColumnReference(node) => builder.string(node),
            Self::SetFunction(node) => builder.string(node),
            Self::QuerySpecification(node) => builder.string(node),
            Self::ValueExpression(node) => builder.string(node),
            Self::CommonValueExpression(node) => builder.string(node),
            Self::BooleanValueExpression(node) => builder.string(node),
            Self::BooleanTerm(node) => builder.string(node),
            Self::BooleanPredicand(node) => builder.string(node),
            Self::CharacterValueExpression(node) => builder.string(node),
            Self::CharacterFactor(node) => builder.string(node),
            Self::CharacterPrimary(node) => builder.string(node),
            Self::NumericValueExpression(node) => builder.string(node),
            Self::Term(node) => builder.string(node),
            Self::Factor(node) => builder.string(node),
            Self::NumericPrimary(node) => builder.string(node),
        };
        f.write_str(&text)
    }
}

/// Promotes a literal to the primary its signedness calls for.
#[must_use]
pub fn literal(value: SqlValue) -> NonparenthesizedValueExpressionPrimary {
    match value {
        SqlValue::UInt(_) => NonparenthesizedValueExpressionPrimary::UnsignedValue(
            UnsignedNumericLiteral(value).into(),
        ),
        SqlValue::Int(_) | SqlValue::Float(_) => {
            NonparenthesizedValueExpressionPrimary::SignedLiteral(SignedNumericLiteral(value))
        }
        SqlValue::Null
        | SqlValue::Bool(_)
        | SqlValue::Text(_)
        | SqlValue::Blob(_) => {
            NonparenthesizedValueExpressionPrimary::UnsignedValue(GeneralLiteral(value).into())
        }
    }
}

fn scalar_subquery(statement: SelectStatement) -> NonparenthesizedValueExpressionPrimary {
    NonparenthesizedValueExpressionPrimary::ScalarSubquery(Subquery(Box::new(statement)))
}

/// Coerces to `<nonparenthesized value expression primary>`.
///
/// # Errors
///
/// Fails for relations, predicates, sort specifications and compound
/// expressions.
pub fn value_expression_primary(
    operand: Operand,
) -> Result<NonparenthesizedValueExpressionPrimary> {
    match operand {
        Operand::NonparenthesizedPrimary(primary) => Ok(primary),
        Operand::Primary(ValueExpressionPrimary::NonParenthesized(primary)) => Ok(primary),
        Operand::UnsignedValue(value) => {
            Ok(NonparenthesizedValueExpressionPrimary::UnsignedValue(value))
        }
        Operand::ColumnReference(column) => {
            Ok(NonparenthesizedValueExpressionPrimary::ColumnReference(column))
        }
        Operand::SetFunction(function) => {
            Ok(NonparenthesizedValueExpressionPrimary::SetFunction(function))
        }
        Operand::Subquery(subquery) => Ok(NonparenthesizedValueExpressionPrimary::ScalarSubquery(
            subquery.subquery(),
        )),
        Operand::QuerySpecification(query) => Ok(scalar_subquery(SelectStatement::Query(query))),
        Operand::Selection(selection) => Ok(scalar_subquery(selection.into_statement())),
        Operand::Column(column) => Ok(NonparenthesizedValueExpressionPrimary::ColumnReference(
            column.column_reference(),
        )),
        Operand::Value(value) => Ok(literal(value)),
        Operand::Function(function) => match function.body() {
            FunctionBody::Set(set) => Ok(NonparenthesizedValueExpressionPrimary::SetFunction(
                set.clone(),
            )),
            _ => Err(Operand::Function(function).reject("nonparenthesized value expression primary")),
        },
        Operand::ValueExpression(ref expr) => match expr.as_primary() {
            Some(primary) => Ok(primary.clone()),
            None => Err(operand.reject("nonparenthesized value expression primary")),
        },
        Operand::CommonValueExpression(ref expr) => match expr.as_primary() {
            Some(primary) => Ok(primary.clone()),
            None => Err(operand.reject("nonparenthesized value expression primary")),
        },
        other => Err(other.reject("nonparenthesized value expression primary")),
    }
}

/// Coerces to `<row value predicand>`.
///
/// # Errors
///
/// Fails for relations and sort specifications.
pub fn row_value_predicand(operand: Operand) -> Result<RowValuePredicand> {
    match operand {
        Operand::RowValuePredicand(predicand) => Ok(predicand),
        Operand::BooleanPredicand(predicand) => Ok(RowValuePredicand::Boolean(predicand)),
        Operand::CommonValueExpression(expr) => Ok(match expr.as_primary() {
            Some(primary) => RowValuePredicand::Primary(primary.clone()),
            None => RowValuePredicand::Common(expr),
        }),
        Operand::Relation(_) | Operand::Sort(_) => Err(operand.reject("row value predicand")),
        Operand::Predicate(_)
        | Operand::BooleanValueExpression(_)
        | Operand::BooleanTerm(_) => Ok(RowValuePredicand::Boolean(
            BooleanPredicand::Parenthesized(Box::new(boolean_value_expression(operand)?)),
        )),
        operand => match value_expression(operand)? {
            ValueExpression::Common(expr) => Ok(match expr.as_primary() {
                Some(primary) => RowValuePredicand::Primary(primary.clone()),
                None => RowValuePredicand::Common(expr),
            }),
            ValueExpression::Boolean(expr) => Ok(RowValuePredicand::Boolean(
                BooleanPredicand::Parenthesized(expr),
            )),
        },
    }
}

/// Coerces to `<value expression>`.
///
/// # Errors
///
/// Fails for relations and sort specifications.
pub fn value_expression(operand: Operand) -> Result<ValueExpression> {
    match operand {
        Operand::ValueExpression(expr) => Ok(expr),
        Operand::CommonValueExpression(expr) => Ok(ValueExpression::Common(expr)),
        Operand::Function(function) => Ok(function.value_expression()),
        Operand::Primary(primary) => Ok(ValueExpression::Common(CommonValueExpression::Numeric(
            NumericValueExpression::from(NumericPrimary::Value(primary)),
        ))),
        Operand::RowValuePredicand(RowValuePredicand::Primary(primary)) => {
            Ok(ValueExpression::from(primary))
        }
        Operand::RowValuePredicand(RowValuePredicand::Common(expr)) => {
            Ok(ValueExpression::Common(expr))
        }
        Operand::RowValuePredicand(RowValuePredicand::Boolean(predicand))
        | Operand::BooleanPredicand(predicand) => {
            Ok(ValueExpression::from(BooleanValueExpression::from(predicand)))
        }
        Operand::Predicate(_) | Operand::BooleanValueExpression(_) | Operand::BooleanTerm(_) => {
            Ok(ValueExpression::from(boolean_value_expression(operand)?))
        }
        Operand::NumericValueExpression(_)
        | Operand::Term(_)
        | Operand::Factor(_)
        | Operand::NumericPrimary(_) => Ok(ValueExpression::Common(
            CommonValueExpression::Numeric(numeric_value_expression(operand)?),
        )),
        Operand::CharacterValueExpression(_)
        | Operand::CharacterFactor(_)
        | Operand::CharacterPrimary(_) => Ok(ValueExpression::Common(CommonValueExpression::from(
            character_value_expression(operand)?,
        ))),
        Operand::Relation(_) | Operand::Sort(_) => Err(operand.reject("value expression")),
        operand => Ok(ValueExpression::from(value_expression_primary(operand)?)),
    }
}

/// Coerces to `<boolean value expression>`.
///
/// # Errors
///
/// Fails for anything that is not already boolean.
pub fn boolean_value_expression(operand: Operand) -> Result<BooleanValueExpression> {
    match operand {
        Operand::BooleanValueExpression(expr) => Ok(expr),
        Operand::BooleanTerm(term) => Ok(BooleanValueExpression::Term(term)),
        Operand::Predicate(predicate) => Ok(BooleanValueExpression::from(predicate)),
        Operand::BooleanPredicand(predicand)
        | Operand::RowValuePredicand(RowValuePredicand::Boolean(predicand)) => {
            Ok(BooleanValueExpression::from(predicand))
        }
        Operand::ValueExpression(ValueExpression::Boolean(expr)) => Ok(*expr),
        other => Err(other.reject("boolean value expression")),
    }
}

/// Coerces to `<character value expression>`.
///
/// # Errors
///
/// Fails for numeric literals and non-character expressions.
pub fn character_value_expression(operand: Operand) -> Result<CharacterValueExpression> {
    match operand {
        Operand::CharacterValueExpression(expr) => Ok(expr),
        Operand::CharacterFactor(factor) => Ok(CharacterValueExpression::Factor(factor)),
        Operand::CharacterPrimary(primary) => Ok(CharacterValueExpression::from(primary)),
        Operand::Value(value @ (SqlValue::Text(_) | SqlValue::Null)) => {
            Ok(CharacterValueExpression::from(
                NonparenthesizedValueExpressionPrimary::UnsignedValue(
                    GeneralLiteral(value).into(),
                ),
            ))
        }
        Operand::Function(ref function) => match function.body() {
            FunctionBody::Character(expr) => Ok(expr.clone()),
            FunctionBody::Set(set) => Ok(CharacterValueExpression::from(
                NonparenthesizedValueExpressionPrimary::SetFunction(set.clone()),
            )),
            FunctionBody::Numeric(_) | FunctionBody::Datetime(_) => {
                Err(operand.reject("character value expression"))
            }
        },
        Operand::CommonValueExpression(CommonValueExpression::String(
            StringValueExpression::Character(expr),
        ))
        | Operand::ValueExpression(ValueExpression::Common(CommonValueExpression::String(
            StringValueExpression::Character(expr),
        ))) => Ok(expr),
        Operand::Value(_) => Err(operand.reject("character value expression")),
        operand => {
            if let Operand::CommonValueExpression(expr)
            | Operand::ValueExpression(ValueExpression::Common(expr)) = &operand
            {
                if expr.as_primary().is_none() {
                    return Err(operand.reject("character value expression"));
                }
            }
            let target = operand.reject("character value expression");
            value_expression_primary(operand)
                .map(CharacterValueExpression::from)
                .map_err(|_| target)
        }
    }
}

/// Coerces to `<string value expression>`; blobs become blob expressions,
/// everything else goes through [`character_value_expression`].
///
/// # Errors
///
/// Fails where [`character_value_expression`] fails.
pub fn string_value_expression(operand: Operand) -> Result<StringValueExpression> {
    match operand {
        Operand::Value(value @ SqlValue::Blob(_)) => Ok(StringValueExpression::Blob(
            BlobValueExpression::Factor(BlobPrimary(ValueExpressionPrimary::NonParenthesized(
                literal(value),
            ))),
        )),
        Operand::CommonValueExpression(CommonValueExpression::String(expr))
        | Operand::ValueExpression(ValueExpression::Common(CommonValueExpression::String(expr))) => {
            Ok(expr)
        }
        operand => Ok(StringValueExpression::Character(character_value_expression(
            operand,
        )?)),
    }
}

/// Coerces to `<numeric value expression>`.
///
/// # Errors
///
/// Fails for non-numeric literals and non-numeric expressions.
pub fn numeric_value_expression(operand: Operand) -> Result<NumericValueExpression> {
    match operand {
        Operand::NumericValueExpression(expr) => Ok(expr),
        Operand::Term(term) => Ok(NumericValueExpression::Term(term)),
        Operand::Factor(factor) => Ok(NumericValueExpression::from(factor)),
        Operand::NumericPrimary(primary) => Ok(NumericValueExpression::from(primary)),
        Operand::Value(value) if value.is_numeric() => {
            Ok(NumericValueExpression::from(literal(value)))
        }
        Operand::Value(_) => Err(operand.reject("numeric value expression")),
        Operand::Function(ref function) => match function.body() {
            FunctionBody::Numeric(expr) => Ok(expr.clone()),
            FunctionBody::Set(set) => Ok(NumericValueExpression::from(
                NonparenthesizedValueExpressionPrimary::SetFunction(set.clone()),
            )),
            FunctionBody::Character(_) | FunctionBody::Datetime(_) => {
                Err(operand.reject("numeric value expression"))
            }
        },
        Operand::CommonValueExpression(CommonValueExpression::Numeric(expr))
        | Operand::ValueExpression(ValueExpression::Common(CommonValueExpression::Numeric(expr))) => {
            Ok(expr)
        }
        Operand::Primary(primary) => Ok(NumericValueExpression::from(NumericPrimary::Value(primary))),
        operand => {
            let target = operand.reject("numeric value expression");
            value_expression_primary(operand)
                .map(NumericValueExpression::from)
                .map_err(|_| target)
        }
    }
}

/// Coerces to `<column reference>`.
///
/// # Errors
///
/// Fails for anything but columns and column references.
pub fn column_reference(operand: Operand) -> Result<ColumnReference> {
    match operand {
        Operand::ColumnReference(column) => Ok(column),
        Operand::Column(column) => Ok(column.column_reference()),
        Operand::NonparenthesizedPrimary(NonparenthesizedValueExpressionPrimary::ColumnReference(
            column,
        )) => Ok(column),
        other => Err(other.reject("column reference")),
    }
}

/// Coerces to `<sort specification>`; a bare value sorts ascending.
///
/// # Errors
///
/// Fails where [`value_expression`] fails.
pub fn sort_specification(operand: Operand) -> Result<SortSpecification> {
    match operand {
        Operand::Sort(sort) => Ok(sort),
        operand => Ok(SortSpecification::new(value_expression(operand)?)),
    }
}

// Conversions into `Operand`.

macro_rules! impl_operand_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_sql_value())
                }
            }
        )+
    };
}

impl_operand_from_value!(
    SqlValue, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, String,
    &str, &String, Vec<u8>, &[u8],
);

impl<T: ToSqlValue> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        Self::Value(value.to_sql_value())
    }
}

macro_rules! impl_operand_from_node {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

impl_operand_from_node!(
    Column(Column),
    Function(Function),
    Subquery(ScalarSubquery),
    Relation(Relation),
    Predicate(Predicate),
    Sort(SortSpecification),
    RowValuePredicand(RowValuePredicand),
    Primary(ValueExpressionPrimary),
    NonparenthesizedPrimary(NonparenthesizedValueExpressionPrimary),
    UnsignedValue(UnsignedValueSpecification),
    ColumnReference(ColumnReference),
    SetFunction(SetFunctionSpecification),
    QuerySpecification(QuerySpecification),
    ValueExpression(ValueExpression),
    CommonValueExpression(CommonValueExpression),
    BooleanValueExpression(BooleanValueExpression),
    BooleanTerm(BooleanTerm),
    BooleanPredicand(BooleanPredicand),
    CharacterValueExpression(CharacterValueExpression),
    CharacterFactor(CharacterFactor),
    CharacterPrimary(CharacterPrimary),
    NumericValueExpression(NumericValueExpression),
    Term(Term),
    Factor(Factor),
    NumericPrimary(NumericPrimary),
);

impl From<&Column> for Operand {
    fn from(column: &Column) -> Self {
        Self::Column(column.clone())
    }
}

impl From<&Function> for Operand {
    fn from(function: &Function) -> Self {
        Self::Function(function.clone())
    }
}

impl From<Table> for Operand {
    fn from(table: Table) -> Self {
        Self::Relation(Relation::Table(table))
    }
}

impl From<&Table> for Operand {
    fn from(table: &Table) -> Self {
        Self::Relation(Relation::Table(table.clone()))
    }
}

impl From<DerivedTable> for Operand {
    fn from(derived: DerivedTable) -> Self {
        Self::Relation(Relation::Derived(derived))
    }
}

impl From<&DerivedTable> for Operand {
    fn from(derived: &DerivedTable) -> Self {
        Self::Relation(Relation::Derived(derived.clone()))
    }
}

impl From<&Relation> for Operand {
    fn from(relation: &Relation) -> Self {
        Self::Relation(relation.clone())
    }
}

impl From<Selection> for Operand {
    fn from(selection: Selection) -> Self {
        Self::Selection(Box::new(selection))
    }
}

impl From<&Selection> for Operand {
    fn from(selection: &Selection) -> Self {
        Self::Selection(Box::new(selection.clone()))
    }
}

/// A variadic argument list.
///
/// Implemented for `()`, tuples of up to twelve operands, arrays, vectors
/// and every single handle type, so `select(users)`, `select((id, name))`
/// and `group_by([id])` all work.
pub trait Operands {
    /// Converts into a list of operands, preserving order.
    fn into_operands(self) -> Vec<Operand>;
}

impl Operands for () {
    fn into_operands(self) -> Vec<Operand> {
        Vec::new()
    }
}

impl<T: Into<Operand>> Operands for Vec<T> {
    fn into_operands(self) -> Vec<Operand> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Operand>, const N: usize> Operands for [T; N] {
    fn into_operands(self) -> Vec<Operand> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! impl_operands_single {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Operands for $ty {
                fn into_operands(self) -> Vec<Operand> {
                    vec![Operand::from(self)]
                }
            }
        )+
    };
}

impl_operands_single!(
    Operand,
    Column,
    &Column,
    Function,
    &Function,
    ScalarSubquery,
    Table,
    &Table,
    DerivedTable,
    &DerivedTable,
    Relation,
    &Relation,
    Selection,
    &Selection,
    SortSpecification,
    ColumnReference,
    ValueExpression,
    SqlValue,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    &str,
    String,
);

macro_rules! impl_operands_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Operand>),+> Operands for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_operands(self) -> Vec<Operand> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_operands_tuple!(A);
impl_operands_tuple!(A, B);
impl_operands_tuple!(A, B, C);
impl_operands_tuple!(A, B, C, D);
impl_operands_tuple!(A, B, C, D, E);
impl_operands_tuple!(A, B, C, D, E, F);
impl_operands_tuple!(A, B, C, D, E, F, G);
impl_operands_tuple!(A, B, C, D, E, F, G, H);
impl_operands_tuple!(A, B, C, D, E, F, G, H, I);
impl_operands_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_operands_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_operands_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{Catalog, TableSchema};

    fn users() -> Table {
        let mut catalog = Catalog::new("app");
        catalog.add_table(TableSchema::new("users").columns(["id", "name"]))
    }

    #[test]
    fn test_literal_typing() {
        assert!(matches!(
            literal(SqlValue::UInt(1)),
            NonparenthesizedValueExpressionPrimary::UnsignedValue(UnsignedValueSpecification(
                crate::grammar::UnsignedLiteral::Numeric(_)
            ))
        ));
        assert!(matches!(
            literal(SqlValue::Int(-1)),
            NonparenthesizedValueExpressionPrimary::SignedLiteral(_)
        ));
        assert!(matches!(
            literal(SqlValue::Float(1.5)),
            NonparenthesizedValueExpressionPrimary::SignedLiteral(_)
        ));
        assert!(matches!(
            literal(SqlValue::Text(String::from("x"))),
            NonparenthesizedValueExpressionPrimary::UnsignedValue(UnsignedValueSpecification(
                crate::grammar::UnsignedLiteral::General(_)
            ))
        ));
    }

    #[test]
    fn test_column_to_row_value_predicand() {
        let id = users().c("id").unwrap();
        assert_eq!(
            row_value_predicand(Operand::from(&id)).unwrap(),
            RowValuePredicand::Primary(NonparenthesizedValueExpressionPrimary::ColumnReference(
                ColumnReference::qualified("users", "id")
            ))
        );
    }

    #[test]
    fn test_alias_does_not_leak_into_reference() {
        let name = users().c("name").unwrap().as_("author");
        assert_eq!(
            column_reference(Operand::from(name)).unwrap(),
            ColumnReference::qualified("users", "name")
        );
    }

    #[test]
    fn test_relation_is_not_a_value() {
        let err = row_value_predicand(Operand::from(users())).unwrap_err();
        assert_eq!(
            err,
            Error::Coercion {
                type_name: "relation",
                value: String::from("users"),
                target: "row value predicand",
            }
        );
    }

    #[test]
    fn test_sort_is_not_a_value() {
        let sort = users().c("id").unwrap().desc();
        let err = value_expression(Operand::from(sort)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot coerce sort specification `users.id DESC` into value expression"
        );
    }

    #[test]
    fn test_numeric_and_character_positions() {
        assert!(numeric_value_expression(Operand::from(3_u8)).is_ok());
        let err = numeric_value_expression(Operand::from("three")).unwrap_err();
        assert!(matches!(
            err,
            Error::Coercion {
                type_name: "text",
                target: "numeric value expression",
                ..
            }
        ));

        assert!(character_value_expression(Operand::from("x")).is_ok());
        let err = character_value_expression(Operand::from(3_i32)).unwrap_err();
        assert!(matches!(
            err,
            Error::Coercion {
                type_name: "signed integer",
                ..
            }
        ));
        assert!(character_value_expression(Operand::from(users().c("name").unwrap())).is_ok());
    }

    #[test]
    fn test_boolean_position_rejects_values() {
        let err = boolean_value_expression(Operand::from(true)).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bare_value_sorts_ascending() {
        let sort = sort_specification(Operand::from(users().c("id").unwrap())).unwrap();
        assert_eq!(sort.ordering, crate::grammar::OrderingSpecification::Asc);
    }

    #[test]
    fn test_operands_shapes() {
        let id = users().c("id").unwrap();
        assert!(().into_operands().is_empty());
        assert_eq!((&id, 1, "x").into_operands().len(), 3);
        assert_eq!([1, 2, 3].into_operands().len(), 3);
        assert_eq!(vec![&id].into_operands().len(), 1);
        assert_eq!(id.into_operands().len(), 1);
    }
}
