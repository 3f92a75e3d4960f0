//! Aggregates, string and datetime functions, and arithmetic.
//!
//! Every function remembers the relation its first bound argument comes
//! from, so `select(count(users.c("id")?)?)` still puts `users` in FROM.

use crate::coerce::{self, Operand, Operands};
use crate::error::{misuse, Result};
use crate::grammar::{
    CharLengthUnits, CharacterFactor, CharacterPrimary, CharacterValueExpression,
    CharacterValueFunction, CommonValueExpression, DatetimeValueFunction, Factor, FoldCase,
    GeneralSetFunction, Identifier, NumericPrimary, NumericValueExpression, NumericValueFunction,
    SetFunctionSpecification, SetFunctionType, SetQuantifier, Sign, SortSpecification, Term,
    TrimSpecification, ValueExpression, ValueExpressionPrimary,
};
use crate::meta::{Function, FunctionBody, Projection, Relation, Table};

fn relation_of<'a>(operands: impl IntoIterator<Item = &'a Operand>) -> Option<Relation> {
    operands
        .into_iter()
        .find_map(|operand| operand.relation().cloned())
}

/// An aggregate call: `COUNT`, `AVG`, `MIN`, `MAX` or `SUM`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    kind: SetFunctionType,
    quantifier: Option<SetQuantifier>,
    value: Option<ValueExpression>,
    relation: Option<Relation>,
    alias: Option<String>,
}

impl Aggregate {
    fn new(kind: SetFunctionType, value: impl Into<Operand>) -> Result<Self> {
        let value = value.into();
        let relation = relation_of([&value]);
        Ok(Self {
            kind,
            quantifier: None,
            value: Some(coerce::value_expression(value)?),
            relation,
            alias: None,
        })
    }

    /// Aggregates distinct values only. Has no effect on `COUNT(*)`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        if self.value.is_some() {
            self.quantifier = Some(SetQuantifier::Distinct);
        }
        self
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns the call as a [`Function`].
    #[must_use]
    pub fn function(&self) -> Function {
        let (kind, specification) = match &self.value {
            None => ("count", SetFunctionSpecification::CountStar),
            Some(value) => (
                match self.kind {
                    SetFunctionType::Avg => "avg",
                    SetFunctionType::Max => "max",
                    SetFunctionType::Min => "min",
                    SetFunctionType::Sum => "sum",
                    SetFunctionType::Count => "count",
                },
                SetFunctionSpecification::General(GeneralSetFunction {
                    kind: self.kind,
                    quantifier: self.quantifier,
                    value: Box::new(value.clone()),
                }),
            ),
        };
        let function = Function::new(kind, FunctionBody::Set(specification), self.relation.clone());
        match &self.alias {
            Some(alias) => function.as_(alias.as_str()),
            None => function,
        }
    }

    /// Returns an ascending sort on the result.
    #[must_use]
    pub fn asc(&self) -> SortSpecification {
        self.function().asc()
    }

    /// Returns a descending sort on the result.
    #[must_use]
    pub fn desc(&self) -> SortSpecification {
        self.function().desc()
    }
}

/// `COUNT(*)`, bound to no relation.
#[must_use]
pub const fn count_star() -> Aggregate {
    Aggregate {
        kind: SetFunctionType::Count,
        quantifier: None,
        value: None,
        relation: None,
        alias: None,
    }
}

/// `COUNT(value)`.
///
/// # Errors
///
/// Fails when `value` is not a value.
pub fn count(value: impl Into<Operand>) -> Result<Aggregate> {
    Aggregate::new(SetFunctionType::Count, value)
}

/// `AVG(value)`.
///
/// # Errors
///
/// Fails when `value` is not a value.
pub fn avg(value: impl Into<Operand>) -> Result<Aggregate> {
    Aggregate::new(SetFunctionType::Avg, value)
}

/// `MIN(value)`.
///
/// # Errors
///
/// Fails when `value` is not a value.
pub fn min(value: impl Into<Operand>) -> Result<Aggregate> {
    Aggregate::new(SetFunctionType::Min, value)
}

/// `MAX(value)`.
///
/// # Errors
///
/// Fails when `value` is not a value.
pub fn max(value: impl Into<Operand>) -> Result<Aggregate> {
    Aggregate::new(SetFunctionType::Max, value)
}

/// `SUM(value)`.
///
/// # Errors
///
/// Fails when `value` is not a value.
pub fn sum(value: impl Into<Operand>) -> Result<Aggregate> {
    Aggregate::new(SetFunctionType::Sum, value)
}

impl Table {
    /// `COUNT(*)` without arguments, `COUNT(arg)` with one, bound to this
    /// table either way.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::Misuse`] for two or more arguments.
    pub fn count(&self, args: impl Operands) -> Result<Aggregate> {
        let mut args = args.into_operands();
        let mut aggregate = match args.len() {
            0 => count_star(),
            1 => count(args.remove(0))?,
            n => return Err(misuse(format!("count takes at most one argument, got {n}"))),
        };
        aggregate.relation = Some(Relation::Table(self.clone()));
        Ok(aggregate)
    }
}

/// `SUBSTRING(subject FROM start [FOR length] [USING units])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Substring {
    subject: CharacterValueExpression,
    start: NumericValueExpression,
    length: Option<NumericValueExpression>,
    units: Option<CharLengthUnits>,
    relation: Option<Relation>,
    alias: Option<String>,
}

impl Substring {
    /// Limits the substring to `length` characters.
    ///
    /// # Errors
    ///
    /// Fails when `length` is not numeric.
    pub fn for_(mut self, length: impl Into<Operand>) -> Result<Self> {
        self.length = Some(coerce::numeric_value_expression(length.into())?);
        Ok(self)
    }

    /// Sets the length units.
    #[must_use]
    pub const fn using(mut self, units: CharLengthUnits) -> Self {
        self.units = Some(units);
        self
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns the call as a [`Function`].
    #[must_use]
    pub fn function(&self) -> Function {
        let body = CharacterValueExpression::from(CharacterValueFunction::Substring {
            subject: self.subject.clone(),
            start: self.start.clone(),
            length: self.length.clone(),
            units: self.units,
        });
        let function = Function::new(
            "substring",
            FunctionBody::Character(body),
            self.relation.clone(),
        );
        match &self.alias {
            Some(alias) => function.as_(alias.as_str()),
            None => function,
        }
    }
}

/// `SUBSTRING(subject FROM start)`; see [`Substring::for_`] and
/// [`Substring::using`].
///
/// # Errors
///
/// Fails when `subject` is not a string or `start` is not numeric.
pub fn substring(subject: impl Into<Operand>, start: impl Into<Operand>) -> Result<Substring> {
    let subject = subject.into();
    let start = start.into();
    let relation = relation_of([&subject, &start]);
    Ok(Substring {
        subject: coerce::character_value_expression(subject)?,
        start: coerce::numeric_value_expression(start)?,
        length: None,
        units: None,
        relation,
        alias: None,
    })
}

/// A datetime value function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatetimeFunction {
    function: DatetimeValueFunction,
    alias: Option<String>,
}

impl DatetimeFunction {
    const fn new(function: DatetimeValueFunction) -> Self {
        Self {
            function,
            alias: None,
        }
    }

    /// Sets the fractional seconds precision. `CURRENT_DATE` has none.
    #[must_use]
    pub const fn precision(mut self, precision: u8) -> Self {
        self.function = self.function.with_precision(precision);
        self
    }

    /// Returns a copy with an alias.
    #[must_use]
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// Returns the call as a [`Function`].
    #[must_use]
    pub fn function(&self) -> Function {
        let kind = match self.function {
            DatetimeValueFunction::CurrentDate => "current_date",
            DatetimeValueFunction::CurrentTime(_) => "current_time",
            DatetimeValueFunction::CurrentTimestamp(_) => "current_timestamp",
            DatetimeValueFunction::LocalTime(_) => "localtime",
            DatetimeValueFunction::LocalTimestamp(_) => "localtimestamp",
        };
        let function = Function::new(kind, FunctionBody::Datetime(self.function), None);
        match &self.alias {
            Some(alias) => function.as_(alias.as_str()),
            None => function,
        }
    }
}

/// `CURRENT_DATE`.
#[must_use]
pub const fn current_date() -> DatetimeFunction {
    DatetimeFunction::new(DatetimeValueFunction::CurrentDate)
}

/// `CURRENT_TIME`.
#[must_use]
pub const fn current_time() -> DatetimeFunction {
    DatetimeFunction::new(DatetimeValueFunction::CurrentTime(None))
}

/// `CURRENT_TIMESTAMP`.
#[must_use]
pub const fn current_timestamp() -> DatetimeFunction {
    DatetimeFunction::new(DatetimeValueFunction::CurrentTimestamp(None))
}

/// `LOCALTIME`.
#[must_use]
pub const fn local_time() -> DatetimeFunction {
    DatetimeFunction::new(DatetimeValueFunction::LocalTime(None))
}

/// `LOCALTIMESTAMP`.
#[must_use]
pub const fn local_timestamp() -> DatetimeFunction {
    DatetimeFunction::new(DatetimeValueFunction::LocalTimestamp(None))
}

fn numeric(kind: &'static str, function: NumericValueFunction, relation: Option<Relation>) -> Function {
    Function::new(
        kind,
        FunctionBody::Numeric(NumericValueExpression::from(NumericPrimary::from(function))),
        relation,
    )
}

fn character(
    kind: &'static str,
    function: CharacterValueFunction,
    relation: Option<Relation>,
) -> Function {
    Function::new(
        kind,
        FunctionBody::Character(CharacterValueExpression::from(function)),
        relation,
    )
}

/// `CHAR_LENGTH(value)`.
///
/// # Errors
///
/// Fails when `value` is not a string.
pub fn char_length(value: impl Into<Operand>) -> Result<Function> {
    let value = value.into();
    let relation = relation_of([&value]);
    let value = coerce::character_value_expression(value)?;
    Ok(numeric("char_length", NumericValueFunction::CharLength(value), relation))
}

/// `OCTET_LENGTH(value)`.
///
/// # Errors
///
/// Fails when `value` is not a string or blob.
pub fn octet_length(value: impl Into<Operand>) -> Result<Function> {
    let value = value.into();
    let relation = relation_of([&value]);
    let value = coerce::string_value_expression(value)?;
    Ok(numeric("octet_length", NumericValueFunction::OctetLength(value), relation))
}

/// `SUBSTRING(subject SIMILAR similar ESCAPE escape)`.
///
/// # Errors
///
/// Fails when an operand is not a string.
pub fn regex_substring(
    subject: impl Into<Operand>,
    similar: impl Into<Operand>,
    escape: impl Into<Operand>,
) -> Result<Function> {
    let (subject, similar, escape) = (subject.into(), similar.into(), escape.into());
    let relation = relation_of([&subject, &similar, &escape]);
    let function = CharacterValueFunction::RegexSubstring {
        subject: coerce::character_value_expression(subject)?,
        similar: coerce::character_value_expression(similar)?,
        escape: coerce::character_value_expression(escape)?,
    };
    Ok(character("substring", function, relation))
}

/// `UPPER(subject)` or `LOWER(subject)`.
///
/// # Errors
///
/// Fails when `subject` is not a string.
pub fn fold(case: FoldCase, subject: impl Into<Operand>) -> Result<Function> {
    let subject = subject.into();
    let relation = relation_of([&subject]);
    let subject = coerce::character_value_expression(subject)?;
    let kind = match case {
        FoldCase::Upper => "upper",
        FoldCase::Lower => "lower",
    };
    Ok(character(kind, CharacterValueFunction::Fold { case, subject }, relation))
}

/// `UPPER(subject)`.
///
/// # Errors
///
/// Fails when `subject` is not a string.
pub fn upper(subject: impl Into<Operand>) -> Result<Function> {
    fold(FoldCase::Upper, subject)
}

/// `LOWER(subject)`.
///
/// # Errors
///
/// Fails when `subject` is not a string.
pub fn lower(subject: impl Into<Operand>) -> Result<Function> {
    fold(FoldCase::Lower, subject)
}

/// Checks a name that is written into the SQL text instead of being bound.
fn plain_identifier(name: &str, role: &str) -> Result<Identifier> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(Identifier::new(name))
    } else {
        Err(misuse(format!("`{name}` is not a valid {role} name")))
    }
}

/// `CONVERT(subject USING charset)`.
///
/// `charset` is emitted verbatim, so only plain identifiers (ASCII letters,
/// digits and `_`, not starting with a digit) are accepted.
///
/// # Errors
///
/// Fails when `subject` is not a string, and with [`crate::Error::Misuse`]
/// when `charset` is not a plain identifier.
pub fn convert(subject: impl Into<Operand>, charset: &str) -> Result<Function> {
    let charset = plain_identifier(charset, "character set")?;
    let subject = subject.into();
    let relation = relation_of([&subject]);
    let function = CharacterValueFunction::Transcode {
        subject: coerce::character_value_expression(subject)?,
        charset,
    };
    Ok(character("convert", function, relation))
}

/// `TRANSLATE(subject USING translation)`.
///
/// `translation` is emitted verbatim; see [`convert`].
///
/// # Errors
///
/// Fails when `subject` is not a string, and with [`crate::Error::Misuse`]
/// when `translation` is not a plain identifier.
pub fn translate(subject: impl Into<Operand>, translation: &str) -> Result<Function> {
    let translation = plain_identifier(translation, "translation")?;
    let subject = subject.into();
    let relation = relation_of([&subject]);
    let function = CharacterValueFunction::Translate {
        subject: coerce::character_value_expression(subject)?,
        translation,
    };
    Ok(character("translate", function, relation))
}

fn trim_function(
    specification: Option<TrimSpecification>,
    source: Operand,
    trimmed: Option<Operand>,
) -> Result<Function> {
    let relation = relation_of(std::iter::once(&source).chain(trimmed.as_ref()));
    let function = CharacterValueFunction::Trim {
        specification,
        character: trimmed
            .map(coerce::character_value_expression)
            .transpose()?,
        source: coerce::character_value_expression(source)?,
    };
    Ok(character("trim", function, relation))
}

/// `TRIM(BOTH character FROM source)`.
///
/// # Errors
///
/// Fails when an operand is not a string.
pub fn trim(source: impl Into<Operand>, character: impl Into<Operand>) -> Result<Function> {
    trim_function(
        Some(TrimSpecification::Both),
        source.into(),
        Some(character.into()),
    )
}

/// `TRIM(LEADING character FROM source)`.
///
/// # Errors
///
/// Fails when an operand is not a string.
pub fn ltrim(source: impl Into<Operand>, character: impl Into<Operand>) -> Result<Function> {
    trim_function(
        Some(TrimSpecification::Leading),
        source.into(),
        Some(character.into()),
    )
}

/// `TRIM(TRAILING character FROM source)`.
///
/// # Errors
///
/// Fails when an operand is not a string.
pub fn rtrim(source: impl Into<Operand>, character: impl Into<Operand>) -> Result<Function> {
    trim_function(
        Some(TrimSpecification::Trailing),
        source.into(),
        Some(character.into()),
    )
}

/// `TRIM(source)`.
///
/// # Errors
///
/// Fails when `source` is not a string.
pub fn trim_space(source: impl Into<Operand>) -> Result<Function> {
    trim_function(None, source.into(), None)
}

/// `TRIM(LEADING FROM source)`.
///
/// # Errors
///
/// Fails when `source` is not a string.
pub fn ltrim_space(source: impl Into<Operand>) -> Result<Function> {
    trim_function(Some(TrimSpecification::Leading), source.into(), None)
}

/// `TRIM(TRAILING FROM source)`.
///
/// # Errors
///
/// Fails when `source` is not a string.
pub fn rtrim_space(source: impl Into<Operand>) -> Result<Function> {
    trim_function(Some(TrimSpecification::Trailing), source.into(), None)
}

fn arithmetic(
    kind: &'static str,
    left: impl Into<Operand>,
    right: impl Into<Operand>,
    combine: impl FnOnce(NumericValueExpression, NumericValueExpression) -> NumericValueExpression,
) -> Result<Function> {
    let (left, right) = (left.into(), right.into());
    let relation = relation_of([&left, &right]);
    let expr = combine(
        coerce::numeric_value_expression(left)?,
        coerce::numeric_value_expression(right)?,
    );
    Ok(Function::new(kind, FunctionBody::Numeric(expr), relation))
}

/// `left + right`.
///
/// # Errors
///
/// Fails when an operand is not numeric.
pub fn add(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Function> {
    arithmetic("add", left, right, |l, r| {
        NumericValueExpression::Add(Box::new(l), r.into_term())
    })
}

/// `left - right`.
///
/// # Errors
///
/// Fails when an operand is not numeric.
pub fn sub(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Function> {
    arithmetic("sub", left, right, |l, r| {
        NumericValueExpression::Subtract(Box::new(l), r.into_term())
    })
}

/// `left * right`.
///
/// # Errors
///
/// Fails when an operand is not numeric.
pub fn mul(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Function> {
    arithmetic("mul", left, right, |l, r| {
        NumericValueExpression::Term(Term::Multiply(
            Box::new(l.into_term()),
            r.into_term().into_factor(),
        ))
    })
}

/// `left / right`.
///
/// # Errors
///
/// Fails when an operand is not numeric.
pub fn div(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Function> {
    arithmetic("div", left, right, |l, r| {
        NumericValueExpression::Term(Term::Divide(
            Box::new(l.into_term()),
            r.into_term().into_factor(),
        ))
    })
}

/// `-value`.
///
/// # Errors
///
/// Fails when `value` is not numeric.
pub fn neg(value: impl Into<Operand>) -> Result<Function> {
    let value = value.into();
    let relation = relation_of([&value]);
    let mut factor = coerce::numeric_value_expression(value)?
        .into_term()
        .into_factor();
    if factor.sign.is_some() {
        factor = parenthesized(factor);
    }
    factor.sign = Some(Sign::Minus);
    Ok(Function::new(
        "neg",
        FunctionBody::Numeric(NumericValueExpression::from(factor)),
        relation,
    ))
}

fn parenthesized(factor: Factor) -> Factor {
    Factor::from(NumericPrimary::Value(ValueExpressionPrimary::Parenthesized(
        Box::new(ValueExpression::from(CommonValueExpression::Numeric(
            NumericValueExpression::from(factor),
        ))),
    )))
}

/// `left || right`.
///
/// # Errors
///
/// Fails when an operand is not a string.
pub fn concat(left: impl Into<Operand>, right: impl Into<Operand>) -> Result<Function> {
    let (left, right) = (left.into(), right.into());
    let relation = relation_of([&left, &right]);
    let left = coerce::character_value_expression(left)?;
    let right = match coerce::character_value_expression(right)? {
        CharacterValueExpression::Factor(factor) => factor,
        concatenation => CharacterFactor {
            primary: CharacterPrimary::Value(ValueExpressionPrimary::Parenthesized(Box::new(
                ValueExpression::from(CommonValueExpression::from(concatenation)),
            ))),
        },
    };
    Ok(Function::new(
        "concat",
        FunctionBody::Character(left.concat(right)),
        relation,
    ))
}

macro_rules! impl_function_wrapper {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Function {
                fn from(wrapper: $ty) -> Self {
                    wrapper.function()
                }
            }

            impl From<&$ty> for Function {
                fn from(wrapper: &$ty) -> Self {
                    wrapper.function()
                }
            }

            impl From<$ty> for Operand {
                fn from(wrapper: $ty) -> Self {
                    Self::Function(wrapper.function())
                }
            }

            impl From<&$ty> for Operand {
                fn from(wrapper: &$ty) -> Self {
                    Self::Function(wrapper.function())
                }
            }

            impl From<$ty> for Projection {
                fn from(wrapper: $ty) -> Self {
                    Self::Function(wrapper.function())
                }
            }

            impl Operands for $ty {
                fn into_operands(self) -> Vec<Operand> {
                    vec![Operand::from(self)]
                }
            }
        )+
    };
}

impl_function_wrapper!(Aggregate, Substring, DatetimeFunction);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::meta::{Catalog, TableSchema};

    fn users() -> Table {
        let mut catalog = Catalog::new("app");
        catalog.add_table(TableSchema::new("users").columns(["id", "name", "score"]))
    }

    fn render(function: impl Into<Function>) -> String {
        let function: Function = function.into();
        Builder::new().string(&function.value_expression())
    }

    #[test]
    fn test_aggregates() {
        let users = users();
        let id = users.c("id").unwrap();
        assert_eq!(render(count(&id).unwrap().distinct()), "COUNT(DISTINCT users.id)");
        assert_eq!(render(count_star().distinct()), "COUNT(*)");
        assert_eq!(render(sum(users.c("score").unwrap()).unwrap()), "SUM(users.score)");
        assert_eq!(count(&id).unwrap().function().relation(), Some(&Relation::Table(users)));
    }

    #[test]
    fn test_table_count() {
        let users = users();
        assert_eq!(render(users.count(()).unwrap()), "COUNT(*)");
        assert_eq!(
            render(users.count(users.c("id").unwrap()).unwrap()),
            "COUNT(users.id)"
        );
        assert!(users.count((1, 2)).is_err());
        assert!(users.count(()).unwrap().function().relation().is_some());
    }

    #[test]
    fn test_substring() {
        let name = users().c("name").unwrap();
        let call = substring(&name, 2).unwrap();
        assert_eq!(render(call.clone()), "SUBSTRING(users.name FROM ?)");
        assert_eq!(
            render(call.for_(3).unwrap().using(CharLengthUnits::Octets)),
            "SUBSTRING(users.name FROM ? FOR ? USING OCTETS)"
        );
        assert!(substring(&name, "two").is_err());
    }

    #[test]
    fn test_string_functions() {
        let name = users().c("name").unwrap();
        assert_eq!(render(upper(&name).unwrap()), "UPPER(users.name)");
        assert_eq!(render(char_length(&name).unwrap()), "CHAR_LENGTH(users.name)");
        assert_eq!(render(convert(&name, "utf8").unwrap()), "CONVERT(users.name USING utf8)");
        assert_eq!(render(concat(&name, "!").unwrap()), "users.name || ?");
        assert!(upper(5).is_err());
    }

    #[test]
    fn test_verbatim_names_must_be_identifiers() {
        let name = users().c("name").unwrap();
        assert!(convert(&name, "utf8mb4").is_ok());
        assert!(translate(&name, "_latin1").is_ok());
        for bad in ["", "1abc", "utf8) --", "a b", "x'y"] {
            assert!(matches!(convert(&name, bad), Err(crate::Error::Misuse(_))));
            assert!(matches!(translate(&name, bad), Err(crate::Error::Misuse(_))));
        }
    }

    #[test]
    fn test_arithmetic() {
        let score = users().c("score").unwrap();
        let total = add(&score, 1).unwrap();
        assert_eq!(render(total.clone()), "users.score + ?");
        assert_eq!(render(mul(total, 2).unwrap()), "(users.score + ?) * ?");
        assert_eq!(render(neg(&score).unwrap()), "-users.score");
    }

    #[test]
    fn test_datetime_kind_and_alias() {
        let now = current_timestamp().precision(6).as_("now");
        assert_eq!(now.function().kind(), "current_timestamp");
        assert_eq!(now.function().alias(), Some("now"));
        assert_eq!(render(local_time()), "LOCALTIME");
    }
}
