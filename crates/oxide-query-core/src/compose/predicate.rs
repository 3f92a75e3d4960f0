//! Predicates and boolean combinators.

use crate::coerce::{self, Operand, Operands};
use crate::error::{misuse, Result};
use crate::grammar::{
    BooleanFactor, BooleanPredicand, BooleanPrimary, BooleanTest, BooleanValueExpression, CompOp,
    InPredicateValue, Predicate, SelectStatement, Subquery, TruthTest, TruthValue,
};

fn comparison(left: impl Into<Operand>, op: CompOp, right: impl Into<Operand>) -> Result<Predicate> {
    Ok(Predicate::Comparison {
        left: coerce::row_value_predicand(left.into())?,
        op,
        right: coerce::row_value_predicand(right.into())?,
    })
}

/// `left = right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn equal(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Predicate> {
    comparison(left, CompOp::Equals, right)
}

/// `left <> right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn not_equal(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Predicate> {
    comparison(left, CompOp::NotEquals, right)
}

/// `left > right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn greater_than(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Predicate> {
    comparison(left, CompOp::GreaterThan, right)
}

/// `left >= right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn greater_than_or_equal(
    left: impl Into<Operand>,
    right: impl Into<Operand>,
) -> Result<Predicate> {
    comparison(left, CompOp::GreaterThanOrEquals, right)
}

/// `left < right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn less_than(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Predicate> {
    comparison(left, CompOp::LessThan, right)
}

/// `left <= right`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn less_than_or_equal(
    left: impl Into<Operand>,
    right: impl Into<Operand>,
) -> Result<Predicate> {
    comparison(left, CompOp::LessThanOrEquals, right)
}

fn between_predicate(
    target: impl Into<Operand>,
    negated: bool,
    start: impl Into<Operand>,
    end: impl Into<Operand>,
) -> Result<Predicate> {
    Ok(Predicate::Between {
        target: coerce::row_value_predicand(target.into())?,
        negated,
        start: coerce::row_value_predicand(start.into())?,
        end: coerce::row_value_predicand(end.into())?,
    })
}

/// `target BETWEEN start AND end`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn between(
    target: impl Into<Operand>,
    start: impl Into<Operand>,
    end: impl Into<Operand>,
) -> Result<Predicate> {
    between_predicate(target, false, start, end)
}

/// `target NOT BETWEEN start AND end`.
///
/// # Errors
///
/// Fails when an operand is not a value.
pub fn not_between(
    target: impl Into<Operand>,
    start: impl Into<Operand>,
    end: impl Into<Operand>,
) -> Result<Predicate> {
    between_predicate(target, true, start, end)
}

fn in_predicate(target: impl Into<Operand>, negated: bool, values: impl Operands) -> Result<Predicate> {
    let target = coerce::row_value_predicand(target.into())?;
    let mut values = values.into_operands();
    if values.is_empty() {
        return Err(misuse("IN requires at least one value"));
    }
    let single_query = matches!(
        values.as_slice(),
        [Operand::Selection(_) | Operand::Subquery(_) | Operand::QuerySpecification(_)]
    );
    let query = if single_query { values.pop() } else { None };
    let values = match query {
        Some(Operand::Selection(selection)) => subquery(selection.into_statement()),
        Some(Operand::Subquery(scalar)) => InPredicateValue::Subquery(scalar.subquery()),
        Some(Operand::QuerySpecification(query)) => subquery(SelectStatement::Query(query)),
        _ => InPredicateValue::List(
            values
                .into_iter()
                .map(coerce::row_value_predicand)
                .collect::<Result<_>>()?,
        ),
    };
    Ok(Predicate::In {
        target,
        negated,
        values,
    })
}

/// `target IN (values...)`, or `target IN (<subquery>)` when the only
/// value is a selection or subquery.
///
/// # Errors
///
/// Fails with [`crate::Error::Misuse`] for an empty list and with a
/// coercion error when a value is not a value.
pub fn in_(target: impl Into<Operand>, values: impl Operands) -> Result<Predicate> {
    in_predicate(target, false, values)
}

/// `target NOT IN (values...)`.
///
/// # Errors
///
/// See [`in_`].
pub fn not_in(target: impl Into<Operand>, values: impl Operands) -> Result<Predicate> {
    in_predicate(target, true, values)
}

/// `target IS NULL`.
///
/// # Errors
///
/// Fails when `target` is not a value.
pub fn is_null(target: impl Into<Operand>) -> Result<Predicate> {
    Ok(Predicate::Null {
        target: coerce::row_value_predicand(target.into())?,
        negated: false,
    })
}

/// `target IS NOT NULL`.
///
/// # Errors
///
/// Fails when `target` is not a value.
pub fn is_not_null(target: impl Into<Operand>) -> Result<Predicate> {
    Ok(Predicate::Null {
        target: coerce::row_value_predicand(target.into())?,
        negated: true,
    })
}

/// `left AND right`.
///
/// # Errors
///
/// Fails when an operand is not boolean.
pub fn and_(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<BooleanValueExpression> {
    let left = coerce::boolean_value_expression(left.into())?;
    Ok(left.and(coerce::boolean_value_expression(right.into())?))
}

/// `(left OR right)`.
///
/// # Errors
///
/// Fails when an operand is not boolean.
pub fn or_(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<BooleanValueExpression> {
    let left = coerce::boolean_value_expression(left.into())?;
    Ok(left.or(coerce::boolean_value_expression(right.into())?))
}

/// `NOT expr`.
///
/// # Errors
///
/// Fails when `expr` is not boolean.
pub fn not_(expr: impl Into<Operand>) -> Result<BooleanValueExpression> {
    let expr = coerce::boolean_value_expression(expr.into())?;
    let factor = match expr.into_factor() {
        factor if factor.negated || factor.test.truth.is_some() => parenthesized(factor),
        factor => factor,
    };
    Ok(BooleanValueExpression::from(BooleanFactor {
        negated: true,
        ..factor
    }))
}

fn truth_test(
    expr: impl Into<Operand>,
    negated: bool,
    value: TruthValue,
) -> Result<BooleanValueExpression> {
    let expr = coerce::boolean_value_expression(expr.into())?;
    let factor = match expr.into_factor() {
        factor if factor.negated || factor.test.truth.is_some() => parenthesized(factor),
        factor => factor,
    };
    Ok(BooleanValueExpression::from(BooleanFactor {
        negated: false,
        test: BooleanTest {
            primary: factor.test.primary,
            truth: Some(TruthTest { negated, value }),
        },
    }))
}

/// `expr IS value`.
///
/// # Errors
///
/// Fails when `expr` is not boolean.
pub fn is_(expr: impl Into<Operand>, value: TruthValue) -> Result<BooleanValueExpression> {
    truth_test(expr, false, value)
}

/// `expr IS NOT value`.
///
/// # Errors
///
/// Fails when `expr` is not boolean.
pub fn is_not(expr: impl Into<Operand>, value: TruthValue) -> Result<BooleanValueExpression> {
    truth_test(expr, true, value)
}

fn subquery(statement: SelectStatement) -> InPredicateValue {
    InPredicateValue::Subquery(Subquery(Box::new(statement)))
}

fn parenthesized(factor: BooleanFactor) -> BooleanFactor {
    BooleanFactor::from(BooleanPrimary::Predicand(BooleanPredicand::Parenthesized(
        Box::new(BooleanValueExpression::from(factor)),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::error::Error;
    use crate::meta::{Catalog, Column, TableSchema};

    fn columns() -> (Column, Column) {
        let mut catalog = Catalog::new("app");
        let users = catalog.add_table(TableSchema::new("users").columns(["id", "name"]));
        (users.c("id").unwrap(), users.c("name").unwrap())
    }

    fn render(expr: impl Into<Operand>) -> String {
        let expr = coerce::boolean_value_expression(expr.into()).unwrap();
        Builder::new().string(&expr)
    }

    #[test]
    fn test_comparisons() {
        let (id, name) = columns();
        assert_eq!(render(not_equal(&name, "x").unwrap()), "users.name <> ?");
        assert_eq!(render(greater_than(&id, 1).unwrap()), "users.id > ?");
        assert_eq!(render(less_than_or_equal(&id, 1).unwrap()), "users.id <= ?");
    }

    #[test]
    fn test_in_forms() {
        let (id, _) = columns();
        assert_eq!(render(in_(&id, [1, 2, 3]).unwrap()), "users.id IN (?, ?, ?)");
        assert_eq!(render(not_in(&id, vec![4]).unwrap()), "users.id NOT IN (?)");
        assert!(matches!(in_(&id, Vec::<i32>::new()), Err(Error::Misuse(_))));
    }

    #[test]
    fn test_not_between_and_null() {
        let (id, name) = columns();
        assert_eq!(
            render(not_between(&id, 1, 9).unwrap()),
            "users.id NOT BETWEEN ? AND ?"
        );
        assert_eq!(render(is_not_null(&name).unwrap()), "users.name IS NOT NULL");
    }

    #[test]
    fn test_and_or_not() {
        let (id, name) = columns();
        let either = or_(equal(&id, 1).unwrap(), equal(&id, 2).unwrap()).unwrap();
        let both = and_(either, is_null(&name).unwrap()).unwrap();
        assert_eq!(
            render(both),
            "(users.id = ? OR users.id = ?) AND users.name IS NULL"
        );
        let negated = not_(equal(&id, 1).unwrap()).unwrap();
        assert_eq!(render(negated.clone()), "NOT users.id = ?");
        assert_eq!(render(not_(negated).unwrap()), "NOT (NOT users.id = ?)");
    }

    #[test]
    fn test_truth_tests() {
        let (id, _) = columns();
        assert_eq!(
            render(is_(equal(&id, 1).unwrap(), TruthValue::True).unwrap()),
            "users.id = ? IS TRUE"
        );
        assert_eq!(
            render(is_not(equal(&id, 1).unwrap(), TruthValue::Unknown).unwrap()),
            "users.id = ? IS NOT UNKNOWN"
        );
    }
}
