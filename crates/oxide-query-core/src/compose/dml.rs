//! INSERT, UPDATE and DELETE constructors.

use std::collections::BTreeMap;

use crate::coerce::{self, Operand};
use crate::error::{Error, Result};
use crate::grammar::{
    DeleteStatementSearched, Identifier, InsertStatement, SetClause, UpdateStatementSearched,
};
use crate::meta::Table;
use crate::value::{SqlValue, ToSqlValue};

impl Table {
    /// Resolves every key to a real column name. A column given twice keeps
    /// its last value.
    fn assignments<I, K, V>(&self, values: I) -> Result<BTreeMap<String, SqlValue>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let mut assignments = BTreeMap::new();
        for (column, value) in values {
            let column = self.resolve_column(column.as_ref())?;
            assignments.insert(column, value.to_sql_value());
        }
        if assignments.is_empty() {
            return Err(Error::NoValues);
        }
        Ok(assignments)
    }

    /// Builds a single-row INSERT, columns in name order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValues`] for an empty map and
    /// [`Error::UnknownColumn`] for a key the table does not have.
    pub fn insert<I, K, V>(&self, values: I) -> Result<InsertStatement>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let (columns, values): (Vec<_>, Vec<_>) = self
            .assignments(values)?
            .into_iter()
            .map(|(column, value)| (Identifier(column), value))
            .unzip();
        Ok(InsertStatement {
            table: self.table_name(),
            columns,
            values,
        })
    }

    /// Builds an UPDATE of every row.
    ///
    /// # Errors
    ///
    /// See [`Table::insert`].
    pub fn update_all<I, K, V>(&self, values: I) -> Result<UpdateStatementSearched>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let set = self
            .assignments(values)?
            .into_iter()
            .map(|(column, value)| SetClause {
                column: Identifier(column),
                value,
            })
            .collect();
        Ok(UpdateStatementSearched {
            table: self.table_name(),
            correlation: self.correlation(),
            set,
            where_clause: None,
        })
    }

    /// Builds an UPDATE of the rows matching `condition`.
    ///
    /// # Errors
    ///
    /// See [`Table::insert`]; also fails when `condition` is not boolean.
    pub fn update<I, K, V>(
        &self,
        condition: impl Into<Operand>,
        values: I,
    ) -> Result<UpdateStatementSearched>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let condition = coerce::boolean_value_expression(condition.into())?;
        let mut statement = self.update_all(values)?;
        statement.where_clause = Some(condition);
        Ok(statement)
    }

    /// Builds a DELETE of every row.
    #[must_use]
    pub fn delete_all(&self) -> DeleteStatementSearched {
        DeleteStatementSearched {
            table: self.table_name(),
            correlation: self.correlation(),
            where_clause: None,
        }
    }

    /// Builds a DELETE of the rows matching `condition`.
    ///
    /// # Errors
    ///
    /// Fails when `condition` is not boolean.
    pub fn delete(&self, condition: impl Into<Operand>) -> Result<DeleteStatementSearched> {
        let condition = coerce::boolean_value_expression(condition.into())?;
        Ok(DeleteStatementSearched {
            where_clause: Some(condition),
            ..self.delete_all()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::Builder;
    use crate::compose::equal;
    use crate::error::Error;
    use crate::meta::{Catalog, Table, TableSchema};
    use crate::value::SqlValue;

    fn users() -> Table {
        let mut catalog = Catalog::new("app");
        catalog.add_table(TableSchema::new("users").columns(["id", "name", "created_on"]))
    }

    #[test]
    fn test_insert_orders_columns() {
        let statement = users().insert([("name", "ann"), ("ID", "7")]).unwrap();
        let (sql, args) = Builder::new().string_args(&statement);
        assert_eq!(sql, "INSERT INTO users (id, name) VALUES (?, ?)");
        assert_eq!(args, [SqlValue::Text(String::from("7")), SqlValue::Text(String::from("ann"))]);
    }

    #[test]
    fn test_insert_errors() {
        let none: [(&str, i64); 0] = [];
        assert_eq!(users().insert(none).unwrap_err(), Error::NoValues);
        assert!(matches!(
            users().insert([("nope", 1)]),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_update_last_write_wins() {
        let users = users();
        let statement = users
            .update(
                equal(users.c("id").unwrap(), 1).unwrap(),
                [("name", "a"), ("name", "b")],
            )
            .unwrap();
        let (sql, args) = Builder::new().string_args(&statement);
        assert_eq!(sql, "UPDATE users SET name = ? WHERE users.id = ?");
        assert_eq!(args, [SqlValue::Text(String::from("b")), SqlValue::Int(1)]);
    }

    #[test]
    fn test_delete() {
        let users = users();
        assert_eq!(Builder::new().string(&users.delete_all()), "DELETE FROM users");
        let statement = users
            .as_("u")
            .delete(equal(users.as_("u").c("id").unwrap(), 1).unwrap())
            .unwrap();
        assert_eq!(
            Builder::new().string(&statement),
            "DELETE FROM users AS u WHERE u.id = ?"
        );
    }
}
