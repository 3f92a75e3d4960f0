//! SELECT composition.

use std::collections::BTreeSet;

use tracing::trace;

use crate::builder::{Emit, Output};
use crate::coerce::{self, Operand, Operands};
use crate::error::{misuse, Error, Result};
use crate::grammar::{
    referenced_relations, DerivedColumn, GroupByClause, JoinType, JoinedTable, LimitClause,
    OrderByClause, OrdinaryGroupingSet, QuerySpecification, SelectStatement, SetFunctionSpecification,
    SetQuantifier, TablePrimary, TableReference, UnsignedNumericLiteral, Visitor, Walk,
};
use crate::meta::{Column, DerivedTable, Function, FunctionBody, Projection, Relation, ScalarSubquery};

/// A SELECT under construction.
///
/// Every FROM entry remembers the effective names of the relations it
/// contains, so joins can find the entry their condition connects to and
/// a relation is never added twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    statement: SelectStatement,
    from_names: Vec<Vec<String>>,
    projections: Vec<Projection>,
    alias: Option<String>,
    derived_counter: usize,
}

/// Starts a SELECT.
///
/// Each item is handled according to its kind:
///
/// - a relation adds itself to FROM and projects all of its columns,
///   sorted by name;
/// - a column or function projects itself and adds its relation to FROM;
/// - a selection becomes a derived table (named `derivedN` unless it was
///   [`named`](Selection::named)) whose columns are all projected;
/// - a scalar subquery projects itself without touching FROM;
/// - anything else is projected as a plain value, so `select(1)` works.
///
/// # Errors
///
/// Fails with [`Error::Misuse`] when called without items or when a
/// selection item projects two columns under one name, and with a
/// coercion error when an item cannot be projected.
pub fn select(items: impl Operands) -> Result<Selection> {
    let items = items.into_operands();
    if items.is_empty() {
        return Err(misuse("select requires at least one item"));
    }

    let mut selection = Selection {
        statement: SelectStatement::Query(QuerySpecification::default()),
        from_names: Vec::new(),
        projections: Vec::new(),
        alias: None,
        derived_counter: 0,
    };
    let mut bound = false;
    for item in items {
        match item {
            Operand::Relation(relation) => {
                bound = true;
                selection.add_relation(&relation);
                for column in relation.columns() {
                    selection.project(Projection::Column(column));
                }
            }
            Operand::Selection(inner) => {
                bound = true;
                let derived = selection.derive(*inner)?;
                selection.add_relation(&Relation::Derived(derived.clone()));
                for column in derived.columns() {
                    selection.project(Projection::Column(column));
                }
            }
            Operand::Column(column) => {
                bound = true;
                selection.add_relation(column.relation());
                selection.project(Projection::Column(column));
            }
            Operand::Function(function) => {
                if let Some(relation) = function.relation() {
                    bound = true;
                    selection.add_relation(relation);
                }
                selection.project(Projection::Function(function));
            }
            Operand::Subquery(subquery) => selection.project(Projection::Subquery(subquery)),
            other => {
                let value = coerce::value_expression(other)?;
                selection
                    .statement
                    .query_mut()
                    .select_list
                    .0
                    .push(DerivedColumn { value, alias: None });
            }
        }
    }

    if bound && selection.from_names.is_empty() {
        return Err(Error::NoFrom);
    }
    Ok(selection)
}

impl Selection {
    fn project(&mut self, projection: Projection) {
        self.statement
            .query_mut()
            .select_list
            .0
            .push(projection.derived_column());
        self.projections.push(projection);
    }

    fn contains(&self, name: &str) -> bool {
        self.from_names.iter().flatten().any(|n| n == name)
    }

    fn add_relation(&mut self, relation: &Relation) {
        let name = relation.effective_name();
        if self.contains(name) {
            return;
        }
        self.statement
            .query_mut()
            .table_expression
            .from
            .0
            .push(relation.table_reference());
        self.from_names.push(vec![String::from(name)]);
    }

    fn derive(&mut self, inner: Self) -> Result<DerivedTable> {
        let alias = inner.alias.clone().unwrap_or_else(|| {
            let alias = format!("derived{}", self.derived_counter);
            self.derived_counter += 1;
            trace!(alias = %alias, "generated derived table alias");
            alias
        });
        inner.into_derived(alias)
    }

    /// Function and subquery projections without an alias get their output
    /// name as alias, so every outer column names something the inner
    /// select list defines.
    fn into_derived(mut self, alias: String) -> Result<DerivedTable> {
        let mut columns: Vec<String> = Vec::with_capacity(self.projections.len());
        for index in 0..self.projections.len() {
            let projection = &self.projections[index];
            let name = String::from(projection.name());
            if columns.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                return Err(misuse(format!(
                    "derived table `{alias}` would expose `{name}` twice; alias one of them"
                )));
            }
            if projection.alias().is_none() && !matches!(projection, Projection::Column(_)) {
                let before = projection.derived_column();
                let named = projection.as_(name.as_str());
                if let Some(entry) = self
                    .statement
                    .query_mut()
                    .select_list
                    .0
                    .iter_mut()
                    .find(|entry| **entry == before)
                {
                    *entry = named.derived_column();
                }
                self.projections[index] = named;
            }
            columns.push(name);
        }
        Ok(DerivedTable::new(alias, self.statement, columns))
    }

    fn target(&mut self, target: Operand) -> Result<Relation> {
        match target {
            Operand::Relation(relation) => Ok(relation),
            Operand::Selection(inner) => Ok(Relation::Derived(self.derive(*inner)?)),
            other => Err(other.reject("relation")),
        }
    }

    /// Moves `target` into the FROM entry at the position `find` picks and
    /// builds the joined table with `join`.
    fn attach(
        &mut self,
        target: &Relation,
        find: impl Fn(&[String]) -> bool,
        join: impl FnOnce(TableReference, TablePrimary) -> JoinedTable,
        connected: &BTreeSet<String>,
    ) -> Result<()> {
        let name = String::from(target.effective_name());
        let from = &mut self.statement.query_mut().table_expression.from.0;

        if let Some(index) = self
            .from_names
            .iter()
            .position(|names| names.len() == 1 && names[0] == name)
        {
            from.remove(index);
            self.from_names.remove(index);
        } else if self.from_names.iter().flatten().any(|n| *n == name) {
            return Err(misuse(format!("`{name}` is already joined")));
        }
        if from.is_empty() {
            return Err(misuse("join requires a FROM clause"));
        }

        let index = self
            .from_names
            .iter()
            .rposition(|names| find(names.as_slice()))
            .ok_or_else(|| Error::DisconnectedJoin {
                relations: connected.iter().cloned().collect(),
            })?;
        trace!(
            target = %name,
            left = %self.from_names[index].join(", "),
            "resolved join"
        );

        let left = from.remove(index);
        from.insert(
            index,
            TableReference::Joined(Box::new(join(left, target.table_primary()))),
        );
        self.from_names[index].push(name);
        Ok(())
    }

    fn qualified_join(
        mut self,
        kind: JoinType,
        target: impl Into<Operand>,
        condition: impl Into<Operand>,
    ) -> Result<Self> {
        let target = self.target(target.into())?;
        let condition = coerce::boolean_value_expression(condition.into())?;
        let relations = referenced_relations(&condition);
        self.attach(
            &target,
            |names| names.iter().any(|n| relations.contains(n)),
            |left, right| JoinedTable::Qualified {
                left,
                kind,
                right: TableReference::Primary(right),
                condition,
            },
            &relations,
        )?;
        Ok(self)
    }

    fn unconditional_join(
        mut self,
        target: impl Into<Operand>,
        join: impl FnOnce(TableReference, TablePrimary) -> JoinedTable,
    ) -> Result<Self> {
        let target = self.target(target.into())?;
        self.attach(&target, |_| true, join, &BTreeSet::new())?;
        Ok(self)
    }

    /// Inner-joins `target` on `condition`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DisconnectedJoin`] when the condition mentions no
    /// relation already in FROM.
    pub fn join(self, target: impl Into<Operand>, condition: impl Into<Operand>) -> Result<Self> {
        self.qualified_join(JoinType::Inner, target, condition)
    }

    /// Left-outer-joins `target` on `condition`.
    ///
    /// # Errors
    ///
    /// See [`Selection::join`].
    pub fn outer_join(
        self,
        target: impl Into<Operand>,
        condition: impl Into<Operand>,
    ) -> Result<Self> {
        self.qualified_join(JoinType::LeftOuter, target, condition)
    }

    /// Right-outer-joins `target` on `condition`.
    ///
    /// # Errors
    ///
    /// See [`Selection::join`].
    pub fn right_join(
        self,
        target: impl Into<Operand>,
        condition: impl Into<Operand>,
    ) -> Result<Self> {
        self.qualified_join(JoinType::RightOuter, target, condition)
    }

    /// Full-outer-joins `target` on `condition`.
    ///
    /// # Errors
    ///
    /// See [`Selection::join`].
    pub fn full_join(
        self,
        target: impl Into<Operand>,
        condition: impl Into<Operand>,
    ) -> Result<Self> {
        self.qualified_join(JoinType::FullOuter, target, condition)
    }

    /// `CROSS JOIN target` against the last FROM entry.
    ///
    /// # Errors
    ///
    /// Fails when `target` is not a relation or FROM is empty.
    pub fn cross_join(self, target: impl Into<Operand>) -> Result<Self> {
        self.unconditional_join(target, |left, right| JoinedTable::Cross { left, right })
    }

    /// `NATURAL JOIN target` against the last FROM entry.
    ///
    /// # Errors
    ///
    /// See [`Selection::cross_join`].
    pub fn natural_join(self, target: impl Into<Operand>) -> Result<Self> {
        self.unconditional_join(target, |left, right| JoinedTable::Natural { left, right })
    }

    /// `UNION JOIN target` against the last FROM entry.
    ///
    /// # Errors
    ///
    /// See [`Selection::cross_join`].
    pub fn union_join(self, target: impl Into<Operand>) -> Result<Self> {
        self.unconditional_join(target, |left, right| JoinedTable::Union { left, right })
    }

    /// ANDs `condition` into WHERE.
    ///
    /// # Errors
    ///
    /// Fails when `condition` is not boolean.
    pub fn where_(mut self, condition: impl Into<Operand>) -> Result<Self> {
        let condition = coerce::boolean_value_expression(condition.into())?;
        self.statement.query_mut().add_where(condition);
        Ok(self)
    }

    /// ANDs `condition` into HAVING.
    ///
    /// # Errors
    ///
    /// Fails when `condition` is not boolean.
    pub fn having(mut self, condition: impl Into<Operand>) -> Result<Self> {
        let condition = coerce::boolean_value_expression(condition.into())?;
        self.statement.query_mut().add_having(condition);
        Ok(self)
    }

    /// Appends columns to GROUP BY.
    ///
    /// # Errors
    ///
    /// Fails when an item is not a column.
    pub fn group_by(mut self, columns: impl Operands) -> Result<Self> {
        let sets = columns
            .into_operands()
            .into_iter()
            .map(|operand| coerce::column_reference(operand).map(OrdinaryGroupingSet))
            .collect::<Result<Vec<_>>>()?;
        self.statement
            .query_mut()
            .table_expression
            .group_by
            .get_or_insert_with(GroupByClause::default)
            .0
            .extend(sets);
        Ok(self)
    }

    /// Appends sort keys to ORDER BY. Plain values sort ascending.
    ///
    /// # Errors
    ///
    /// Fails when an item cannot be sorted on.
    pub fn order_by(mut self, specs: impl Operands) -> Result<Self> {
        let specs = specs
            .into_operands()
            .into_iter()
            .map(coerce::sort_specification)
            .collect::<Result<Vec<_>>>()?;
        self.statement
            .cursor_mut()
            .order_by
            .get_or_insert_with(OrderByClause::default)
            .0
            .extend(specs);
        Ok(self)
    }

    /// Sets `LIMIT count`.
    #[must_use]
    pub fn limit(mut self, count: u64) -> Self {
        self.statement.cursor_mut().limit = Some(LimitClause {
            count: UnsignedNumericLiteral::new(count),
            offset: None,
        });
        self
    }

    /// Sets `LIMIT count OFFSET offset`.
    #[must_use]
    pub fn limit_with_offset(mut self, count: u64, offset: u64) -> Self {
        self.statement.cursor_mut().limit = Some(LimitClause {
            count: UnsignedNumericLiteral::new(count),
            offset: Some(UnsignedNumericLiteral::new(offset)),
        });
        self
    }

    /// Turns the query into `SELECT DISTINCT`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.statement.query_mut().quantifier = Some(SetQuantifier::Distinct);
        self
    }

    /// Replaces the select list with `COUNT(*)`.
    #[must_use]
    pub fn count(mut self) -> Self {
        let function = Function::new(
            "count",
            FunctionBody::Set(SetFunctionSpecification::CountStar),
            None,
        );
        self.statement.query_mut().select_list.0 = vec![function.derived_column()];
        self.projections = vec![Projection::Function(function)];
        self
    }

    /// Names the selection for later use as a derived table.
    #[must_use]
    pub fn named(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the name set with [`Selection::named`].
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Wraps the selection into a derived table called `alias`, exposing
    /// one column per projection.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Misuse`] when two projections share an output
    /// name.
    pub fn as_(&self, alias: impl Into<String>) -> Result<DerivedTable> {
        self.clone().into_derived(alias.into())
    }

    /// Returns an outer column of the named selection.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Misuse`] when the selection has no name, and
    /// with [`Error::UnknownColumn`] when nothing is projected as `name`.
    pub fn c(&self, name: &str) -> Result<Column> {
        let alias = self
            .alias
            .as_deref()
            .ok_or_else(|| misuse("columns of a selection require a name; call `named` first"))?;
        self.as_(alias)?.c(name)
    }

    /// Returns the selection as a scalar subquery.
    #[must_use]
    pub fn subquery(&self) -> ScalarSubquery {
        ScalarSubquery::new(self.statement.clone())
    }

    /// Returns the projections in select-list order.
    #[must_use]
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    /// Returns the grammar tree.
    #[must_use]
    pub const fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    /// Consumes the selection, returning the grammar tree.
    #[must_use]
    pub fn into_statement(self) -> SelectStatement {
        self.statement
    }
}

impl Walk for Selection {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.statement.walk(visitor);
    }
}

impl Emit for Selection {
    fn emit(&self, out: &mut Output<'_>) {
        self.statement.emit(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::compose::equal;
    use crate::meta::{Catalog, Table, TableSchema};

    fn tables() -> (Table, Table) {
        let mut catalog = Catalog::new("app");
        let users = catalog.add_table(TableSchema::new("users").columns(["id", "name"]));
        let articles =
            catalog.add_table(TableSchema::new("articles").columns(["id", "author", "state"]));
        (users, articles)
    }

    #[test]
    fn test_select_nothing_is_misuse() {
        assert!(matches!(select(()), Err(Error::Misuse(_))));
    }

    #[test]
    fn test_select_literal_has_no_from() {
        let selection = select(1_u64).unwrap();
        assert_eq!(Builder::new().string(&selection), "SELECT ?");
    }

    #[test]
    fn test_relation_added_once() {
        let (users, _) = tables();
        let selection = select((&users, users.c("id").unwrap())).unwrap();
        assert_eq!(selection.statement().query().from_list().len(), 1);
        assert_eq!(selection.projections().len(), 3);
    }

    #[test]
    fn test_join_moves_standalone_target() {
        let (users, articles) = tables();
        let selection = select((articles.c("id").unwrap(), users.c("name").unwrap()))
            .unwrap()
            .join(
                &users,
                equal(articles.c("author").unwrap(), users.c("id").unwrap()).unwrap(),
            )
            .unwrap();
        assert_eq!(selection.statement().query().from_list().len(), 1);
        assert_eq!(selection.from_names, [vec!["articles", "users"]]);
    }

    #[test]
    fn test_join_twice_is_misuse() {
        let (users, articles) = tables();
        let condition = equal(articles.c("author").unwrap(), users.c("id").unwrap()).unwrap();
        let result = select(&articles)
            .unwrap()
            .join(&users, condition.clone())
            .unwrap()
            .join(&users, condition);
        assert!(matches!(result, Err(Error::Misuse(_))));
    }

    #[test]
    fn test_derived_alias_counter() {
        let (users, _) = tables();
        let inner = select(users.c("id").unwrap()).unwrap();
        let outer = select((inner.clone(), inner)).unwrap();
        assert_eq!(outer.from_names, [vec!["derived0"], vec!["derived1"]]);
    }

    #[test]
    fn test_named_selection_columns() {
        let (users, _) = tables();
        let inner = select(users.c("name").unwrap().as_("author"))
            .unwrap()
            .named("authors");
        let author = inner.c("author").unwrap();
        assert_eq!(Builder::new().string(&author.column_reference()), "authors.author");
        assert!(matches!(
            select(users.c("id").unwrap()).unwrap().c("id"),
            Err(Error::Misuse(_))
        ));
    }

    #[test]
    fn test_count_replaces_projections() {
        let (users, _) = tables();
        let selection = select(&users).unwrap().count();
        assert_eq!(Builder::new().string(&selection), "SELECT COUNT(*) FROM users");
    }
}
