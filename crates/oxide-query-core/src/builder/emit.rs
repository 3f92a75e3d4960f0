//! SQL text emission for every grammar node.

use super::BuilderOptions;
use crate::grammar::{
    BlobPrimary, BlobValueExpression, BooleanFactor, BooleanPredicand, BooleanPrimary,
    BooleanTerm, BooleanTest, BooleanValueExpression, CharacterFactor, CharacterPrimary,
    CharacterValueExpression, CharacterValueFunction, ColumnReference, CommonValueExpression,
    CursorSpecification, DatetimeValueFunction, DeleteStatementSearched, DerivedColumn, Factor,
    GeneralLiteral, Identifier, IdentifierChain, InPredicateValue, InsertStatement, JoinedTable,
    LimitClause, NonparenthesizedValueExpressionPrimary, NumericPrimary, NumericValueExpression,
    NumericValueFunction, Predicate, QuerySpecification, RowValuePredicand, SelectList,
    SelectStatement, SetFunctionSpecification, SignedNumericLiteral, Sign, SortSpecification,
    Statement, StringValueExpression, Subquery, TableName, TablePrimary, TableReference, Term,
    UnsignedLiteral, UnsignedNumericLiteral, UnsignedValueSpecification,
    UpdateStatementSearched, ValueExpression, ValueExpressionPrimary,
};
use crate::value::SqlValue;

/// Output buffer of the emit pass.
///
/// Owns the SQL text and the argument vector; every bound value goes
/// through [`Output::bind`], so the placeholder position is always the
/// argument's 1-based index.
#[derive(Debug)]
pub struct Output<'a> {
    options: &'a BuilderOptions,
    sql: String,
    args: Vec<SqlValue>,
}

impl<'a> Output<'a> {
    /// Creates a buffer sized for `arg_count` bound values, starting with
    /// the configured prefix.
    #[must_use]
    pub fn new(options: &'a BuilderOptions, arg_count: usize) -> Self {
        Self {
            options,
            sql: options.prefix_with.clone(),
            args: Vec::with_capacity(arg_count),
        }
    }

    /// Appends raw SQL text.
    pub fn write(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Starts a major clause: the clause separator, then `keyword` and a
    /// space.
    pub fn clause(&mut self, keyword: &str) {
        self.sql.push_str(&self.options.separate_clause_with);
        self.sql.push_str(keyword);
        self.sql.push(' ');
    }

    /// Emits a placeholder and records its value.
    pub fn bind(&mut self, value: &SqlValue) {
        self.args.push(value.clone());
        let placeholder = self.options.dialect.placeholder(self.args.len());
        self.sql.push_str(&placeholder);
    }

    /// Emits `items` separated by `separator`.
    pub fn list<T: Emit>(&mut self, items: &[T], separator: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            item.emit(self);
        }
    }

    /// Returns the number of values bound so far.
    #[must_use]
    pub fn bound(&self) -> usize {
        self.args.len()
    }

    /// Consumes the buffer.
    #[must_use]
    pub fn finish(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }
}

/// Types that render as SQL text.
pub trait Emit {
    /// Appends the SQL for `self` to `out`.
    fn emit(&self, out: &mut Output<'_>);
}

impl<T: Emit + ?Sized> Emit for &T {
    fn emit(&self, out: &mut Output<'_>) {
        (**self).emit(out);
    }
}

impl<T: Emit + ?Sized> Emit for Box<T> {
    fn emit(&self, out: &mut Output<'_>) {
        (**self).emit(out);
    }
}

impl Emit for SqlValue {
    fn emit(&self, out: &mut Output<'_>) {
        out.bind(self);
    }
}

// Literals

impl Emit for UnsignedNumericLiteral {
    fn emit(&self, out: &mut Output<'_>) {
        out.bind(&self.0);
    }
}

impl Emit for SignedNumericLiteral {
    fn emit(&self, out: &mut Output<'_>) {
        out.bind(&self.0);
    }
}

impl Emit for GeneralLiteral {
    fn emit(&self, out: &mut Output<'_>) {
        out.bind(&self.0);
    }
}

impl Emit for UnsignedLiteral {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Numeric(literal) => literal.emit(out),
            Self::General(literal) => literal.emit(out),
        }
    }
}

impl Emit for UnsignedValueSpecification {
    fn emit(&self, out: &mut Output<'_>) {
        self.0.emit(out);
    }
}

// Names

impl Emit for Identifier {
    fn emit(&self, out: &mut Output<'_>) {
        out.write(self.as_str());
    }
}

impl Emit for IdentifierChain {
    fn emit(&self, out: &mut Output<'_>) {
        out.list(self.segments(), ".");
    }
}

impl Emit for ColumnReference {
    fn emit(&self, out: &mut Output<'_>) {
        self.0.emit(out);
    }
}

impl Emit for TableName {
    fn emit(&self, out: &mut Output<'_>) {
        if let Some(schema) = &self.schema {
            schema.emit(out);
            out.write(".");
        }
        self.name.emit(out);
    }
}

// Value expressions

impl Emit for ValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Common(expr) => expr.emit(out),
            Self::Boolean(expr) => expr.emit(out),
        }
    }
}

impl Emit for CommonValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Numeric(expr) => expr.emit(out),
            Self::String(expr) => expr.emit(out),
            Self::Datetime(expr) => expr.emit(out),
        }
    }
}

impl Emit for ValueExpressionPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Parenthesized(expr) => {
                out.write("(");
                expr.emit(out);
                out.write(")");
            }
            Self::NonParenthesized(primary) => primary.emit(out),
        }
    }
}

impl Emit for NonparenthesizedValueExpressionPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::UnsignedValue(value) => value.emit(out),
            Self::SignedLiteral(literal) => literal.emit(out),
            Self::ColumnReference(column) => column.emit(out),
            Self::SetFunction(function) => function.emit(out),
            Self::ScalarSubquery(subquery) => subquery.emit(out),
        }
    }
}

impl Emit for RowValuePredicand {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Primary(primary) => primary.emit(out),
            Self::Common(expr) => expr.emit(out),
            Self::Boolean(predicand) => predicand.emit(out),
        }
    }
}

impl Emit for Subquery {
    fn emit(&self, out: &mut Output<'_>) {
        out.write("(");
        self.0.emit(out);
        out.write(")");
    }
}

// Numeric

impl Emit for NumericValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Term(term) => term.emit(out),
            Self::Add(left, right) => {
                left.emit(out);
                out.write(" + ");
                right.emit(out);
            }
            Self::Subtract(left, right) => {
                left.emit(out);
                out.write(" - ");
                right.emit(out);
            }
        }
    }
}

impl Emit for Term {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Factor(factor) => factor.emit(out),
            Self::Multiply(left, right) => {
                left.emit(out);
                out.write(" * ");
                right.emit(out);
            }
            Self::Divide(left, right) => {
                left.emit(out);
                out.write(" / ");
                right.emit(out);
            }
        }
    }
}

impl Emit for Factor {
    fn emit(&self, out: &mut Output<'_>) {
        match self.sign {
            Some(Sign::Minus) => out.write("-"),
            Some(Sign::Plus) => out.write("+"),
            None => {}
        }
        self.primary.emit(out);
    }
}

impl Emit for NumericPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Value(value) => value.emit(out),
            Self::Function(function) => function.emit(out),
        }
    }
}

impl Emit for NumericValueFunction {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::CharLength(expr) => {
                out.write("CHAR_LENGTH(");
                expr.emit(out);
            }
            Self::OctetLength(expr) => {
                out.write("OCTET_LENGTH(");
                expr.emit(out);
            }
        }
        out.write(")");
    }
}

// Strings

impl Emit for StringValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Character(expr) => expr.emit(out),
            Self::Blob(expr) => expr.emit(out),
        }
    }
}

impl Emit for CharacterValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Factor(factor) => factor.emit(out),
            Self::Concatenation(left, right) => {
                left.emit(out);
                out.write(" || ");
                right.emit(out);
            }
        }
    }
}

impl Emit for CharacterFactor {
    fn emit(&self, out: &mut Output<'_>) {
        self.primary.emit(out);
    }
}

impl Emit for CharacterPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Value(value) => value.emit(out),
            Self::Function(function) => function.emit(out),
        }
    }
}

impl Emit for CharacterValueFunction {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Substring {
                subject,
                start,
                length,
                units,
            } => {
                out.write("SUBSTRING(");
                subject.emit(out);
                out.write(" FROM ");
                start.emit(out);
                if let Some(length) = length {
                    out.write(" FOR ");
                    length.emit(out);
                }
                if let Some(units) = units {
                    out.write(" USING ");
                    out.write(units.as_str());
                }
            }
            Self::RegexSubstring {
                subject,
                similar,
                escape,
            } => {
                out.write("SUBSTRING(");
                subject.emit(out);
                out.write(" SIMILAR ");
                similar.emit(out);
                out.write(" ESCAPE ");
                escape.emit(out);
            }
            Self::Fold { case, subject } => {
                out.write(case.as_str());
                out.write("(");
                subject.emit(out);
            }
            Self::Transcode { subject, charset } => {
                out.write("CONVERT(");
                subject.emit(out);
                out.write(" USING ");
                charset.emit(out);
            }
            Self::Translate {
                subject,
                translation,
            } => {
                out.write("TRANSLATE(");
                subject.emit(out);
                out.write(" USING ");
                translation.emit(out);
            }
            Self::Trim {
                specification,
                character,
                source,
            } => {
                out.write("TRIM(");
                if let Some(specification) = specification {
                    out.write(specification.as_str());
                    out.write(" ");
                }
                if let Some(character) = character {
                    character.emit(out);
                    out.write(" ");
                }
                if specification.is_some() || character.is_some() {
                    out.write("FROM ");
                }
                source.emit(out);
            }
        }
        out.write(")");
    }
}

impl Emit for BlobValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Factor(primary) => primary.emit(out),
            Self::Concatenation(left, right) => {
                left.emit(out);
                out.write(" || ");
                right.emit(out);
            }
        }
    }
}

impl Emit for BlobPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        self.0.emit(out);
    }
}

impl Emit for DatetimeValueFunction {
    fn emit(&self, out: &mut Output<'_>) {
        out.write(self.keyword());
        if let Some(precision) = self.precision() {
            out.write(&format!("({precision})"));
        }
    }
}

// Booleans

fn emit_disjuncts(expr: &BooleanValueExpression, out: &mut Output<'_>) {
    match expr {
        BooleanValueExpression::Term(term) => term.emit(out),
        BooleanValueExpression::Or(left, right) => {
            emit_disjuncts(left, out);
            out.write(" OR ");
            right.emit(out);
        }
    }
}

impl Emit for BooleanValueExpression {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Term(term) => term.emit(out),
            Self::Or(..) => {
                out.write("(");
                emit_disjuncts(self, out);
                out.write(")");
            }
        }
    }
}

impl Emit for BooleanTerm {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Factor(factor) => factor.emit(out),
            Self::And(left, right) => {
                left.emit(out);
                out.write(" AND ");
                right.emit(out);
            }
        }
    }
}

impl Emit for BooleanFactor {
    fn emit(&self, out: &mut Output<'_>) {
        if self.negated {
            out.write("NOT ");
        }
        self.test.emit(out);
    }
}

impl Emit for BooleanTest {
    fn emit(&self, out: &mut Output<'_>) {
        self.primary.emit(out);
        if let Some(truth) = &self.truth {
            out.write(if truth.negated { " IS NOT " } else { " IS " });
            out.write(truth.value.as_str());
        }
    }
}

impl Emit for BooleanPrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Predicate(predicate) => predicate.emit(out),
            Self::Predicand(predicand) => predicand.emit(out),
        }
    }
}

impl Emit for BooleanPredicand {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            // An OR chain brings its own parentheses.
            Self::Parenthesized(expr) if matches!(**expr, BooleanValueExpression::Or(..)) => {
                expr.emit(out);
            }
            Self::Parenthesized(expr) => {
                out.write("(");
                expr.emit(out);
                out.write(")");
            }
            Self::Primary(primary) => primary.emit(out),
        }
    }
}

impl Emit for Predicate {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Comparison { left, op, right } => {
                left.emit(out);
                out.write(" ");
                out.write(op.as_str());
                out.write(" ");
                right.emit(out);
            }
            Self::Between {
                target,
                negated,
                start,
                end,
            } => {
                target.emit(out);
                out.write(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                start.emit(out);
                out.write(" AND ");
                end.emit(out);
            }
            Self::In {
                target,
                negated,
                values,
            } => {
                target.emit(out);
                out.write(if *negated { " NOT IN " } else { " IN " });
                values.emit(out);
            }
            Self::Null { target, negated } => {
                target.emit(out);
                out.write(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
        }
    }
}

impl Emit for InPredicateValue {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::List(values) => {
                out.write("(");
                out.list(values, ", ");
                out.write(")");
            }
            Self::Subquery(subquery) => subquery.emit(out),
        }
    }
}

impl Emit for SetFunctionSpecification {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::CountStar => out.write("COUNT(*)"),
            Self::General(function) => {
                out.write(function.kind.as_str());
                out.write("(");
                if let Some(quantifier) = function.quantifier {
                    out.write(quantifier.as_str());
                    out.write(" ");
                }
                function.value.emit(out);
                out.write(")");
            }
        }
    }
}

// Queries

impl Emit for QuerySpecification {
    fn emit(&self, out: &mut Output<'_>) {
        out.write("SELECT ");
        if let Some(quantifier) = self.quantifier {
            out.write(quantifier.as_str());
            out.write(" ");
        }
        self.select_list.emit(out);

        let table_expression = &self.table_expression;
        if !table_expression.from.0.is_empty() {
            out.clause("FROM");
            out.list(&table_expression.from.0, ", ");
        }
        if let Some(condition) = &table_expression.where_clause {
            out.clause("WHERE");
            condition.emit(out);
        }
        if let Some(group_by) = &table_expression.group_by {
            out.clause("GROUP BY");
            for (i, set) in group_by.0.iter().enumerate() {
                if i > 0 {
                    out.write(", ");
                }
                set.0.emit(out);
            }
        }
        if let Some(condition) = &table_expression.having {
            out.clause("HAVING");
            condition.emit(out);
        }
    }
}

impl Emit for SelectList {
    fn emit(&self, out: &mut Output<'_>) {
        out.list(&self.0, ", ");
    }
}

impl Emit for DerivedColumn {
    fn emit(&self, out: &mut Output<'_>) {
        self.value.emit(out);
        if let Some(alias) = &self.alias {
            out.write(" AS ");
            alias.emit(out);
        }
    }
}

impl Emit for TableReference {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Primary(primary) => primary.emit(out),
            Self::Joined(joined) => joined.emit(out),
        }
    }
}

impl Emit for TablePrimary {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Table { name, correlation } => {
                name.emit(out);
                if let Some(correlation) = correlation {
                    out.write(" AS ");
                    correlation.emit(out);
                }
            }
            Self::Derived {
                subquery,
                correlation,
            } => {
                subquery.emit(out);
                out.write(" AS ");
                correlation.emit(out);
            }
        }
    }
}

impl Emit for JoinedTable {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Cross { left, right } => {
                left.emit(out);
                out.clause("CROSS JOIN");
                right.emit(out);
            }
            Self::Natural { left, right } => {
                left.emit(out);
                out.clause("NATURAL JOIN");
                right.emit(out);
            }
            Self::Union { left, right } => {
                left.emit(out);
                out.clause("UNION JOIN");
                right.emit(out);
            }
            Self::Qualified {
                left,
                kind,
                right,
                condition,
            } => {
                left.emit(out);
                out.clause(kind.as_str());
                right.emit(out);
                out.write(" ON ");
                condition.emit(out);
            }
        }
    }
}

impl Emit for SelectStatement {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Query(query) => query.emit(out),
            Self::Cursor(cursor) => cursor.emit(out),
        }
    }
}

impl Emit for CursorSpecification {
    fn emit(&self, out: &mut Output<'_>) {
        self.query.emit(out);
        if let Some(order_by) = &self.order_by {
            out.clause("ORDER BY");
            out.list(&order_by.0, ", ");
        }
        if let Some(limit) = &self.limit {
            limit.emit(out);
        }
    }
}

impl Emit for SortSpecification {
    fn emit(&self, out: &mut Output<'_>) {
        self.key.emit(out);
        out.write(" ");
        out.write(self.ordering.as_str());
        if let Some(nulls) = self.nulls {
            out.write(" ");
            out.write(nulls.as_str());
        }
    }
}

impl Emit for LimitClause {
    fn emit(&self, out: &mut Output<'_>) {
        out.clause("LIMIT");
        self.count.emit(out);
        if let Some(offset) = &self.offset {
            out.clause("OFFSET");
            offset.emit(out);
        }
    }
}

// Statements

impl Emit for Statement {
    fn emit(&self, out: &mut Output<'_>) {
        match self {
            Self::Select(statement) => statement.emit(out),
            Self::Insert(statement) => statement.emit(out),
            Self::Update(statement) => statement.emit(out),
            Self::Delete(statement) => statement.emit(out),
        }
    }
}

impl Emit for InsertStatement {
    fn emit(&self, out: &mut Output<'_>) {
        out.write("INSERT INTO ");
        self.table.emit(out);
        out.write(" (");
        out.list(&self.columns, ", ");
        out.write(")");
        out.clause("VALUES");
        out.write("(");
        out.list(&self.values, ", ");
        out.write(")");
    }
}

impl Emit for UpdateStatementSearched {
    fn emit(&self, out: &mut Output<'_>) {
        out.write("UPDATE ");
        self.table.emit(out);
        if let Some(correlation) = &self.correlation {
            out.write(" AS ");
            correlation.emit(out);
        }
        out.clause("SET");
        for (i, clause) in self.set.iter().enumerate() {
            if i > 0 {
                out.write(", ");
            }
            clause.column.emit(out);
            out.write(" = ");
            clause.value.emit(out);
        }
        if let Some(condition) = &self.where_clause {
            out.clause("WHERE");
            condition.emit(out);
        }
    }
}

impl Emit for DeleteStatementSearched {
    fn emit(&self, out: &mut Output<'_>) {
        out.write("DELETE FROM ");
        self.table.emit(out);
        if let Some(correlation) = &self.correlation {
            out.write(" AS ");
            correlation.emit(out);
        }
        if let Some(condition) = &self.where_clause {
            out.clause("WHERE");
            condition.emit(out);
        }
    }
}
