//! Data change statements and the top-level statement sum.

use super::boolean::BooleanValueExpression;
use super::cursor::SelectStatement;
use super::identifier::{Identifier, TableName};
use super::{Visitor, Walk};
use crate::value::SqlValue;

/// Any statement the builder can render.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT.
    Select(SelectStatement),
    /// INSERT.
    Insert(InsertStatement),
    /// UPDATE.
    Update(UpdateStatementSearched),
    /// DELETE.
    Delete(DeleteStatementSearched),
}

/// `INSERT INTO <table> (<columns>) VALUES (<values>)`, single row.
///
/// `columns` and `values` always have the same length and order.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: TableName,
    /// Column names.
    pub columns: Vec<Identifier>,
    /// Bound values.
    pub values: Vec<SqlValue>,
}

/// `<column> = <value>` inside SET.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    /// Column name.
    pub column: Identifier,
    /// Bound value.
    pub value: SqlValue,
}

/// `UPDATE <table> [AS <correlation>] SET ... [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatementSearched {
    /// Target table.
    pub table: TableName,
    /// Correlation name.
    pub correlation: Option<Identifier>,
    /// Assignments.
    pub set: Vec<SetClause>,
    /// Search condition.
    pub where_clause: Option<BooleanValueExpression>,
}

/// `DELETE FROM <table> [AS <correlation>] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatementSearched {
    /// Target table.
    pub table: TableName,
    /// Correlation name.
    pub correlation: Option<Identifier>,
    /// Search condition.
    pub where_clause: Option<BooleanValueExpression>,
}

impl From<SelectStatement> for Statement {
    fn from(statement: SelectStatement) -> Self {
        Self::Select(statement)
    }
}

impl From<InsertStatement> for Statement {
    fn from(statement: InsertStatement) -> Self {
        Self::Insert(statement)
    }
}

impl From<UpdateStatementSearched> for Statement {
    fn from(statement: UpdateStatementSearched) -> Self {
        Self::Update(statement)
    }
}

impl From<DeleteStatementSearched> for Statement {
    fn from(statement: DeleteStatementSearched) -> Self {
        Self::Delete(statement)
    }
}

impl Walk for Statement {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Select(statement) => statement.walk(visitor),
            Self::Insert(statement) => statement.walk(visitor),
            Self::Update(statement) => statement.walk(visitor),
            Self::Delete(statement) => statement.walk(visitor),
        }
    }
}

impl Walk for InsertStatement {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.values.walk(visitor);
    }
}

impl Walk for UpdateStatementSearched {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for clause in &self.set {
            clause.value.walk(visitor);
        }
        self.where_clause.walk(visitor);
    }
}

impl Walk for DeleteStatementSearched {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.where_clause.walk(visitor);
    }
}
