//! Catalog reflection from `information_schema.columns`.

use std::collections::BTreeMap;

use oxide_query_core::compose::{and_, equal, select};
use oxide_query_core::grammar::BooleanValueExpression;
use oxide_query_core::{Builder, Catalog, Dialect, SqlValue, TableSchema};
use tracing::{debug, info};

use crate::connection::{Connection, Row};
use crate::error::{ReflectError, Result};

fn run<C: Connection>(conn: &C, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
    debug!(sql = %sql, args = params.len(), "running reflection query");
    conn.query(sql, params)
        .map(|rows| rows.into_iter().collect())
        .map_err(|e| ReflectError::Connection(Box::new(e)))
}

fn unexpected(sql: &str, row: &[SqlValue]) -> ReflectError {
    let row = row
        .iter()
        .map(SqlValue::to_sql_inline)
        .collect::<Vec<_>>()
        .join(", ");
    ReflectError::UnexpectedRow {
        query: String::from(sql),
        row: format!("({row})"),
    }
}

fn text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Blob(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Guesses the dialect from the connection's driver name.
pub fn detect_dialect<C: Connection>(conn: &C) -> Dialect {
    let dialect = Dialect::from_driver_name(conn.driver_type_name());
    info!(driver = conn.driver_type_name(), dialect = %dialect, "detected dialect");
    dialect
}

/// Returns the name of the database the connection is using.
///
/// # Errors
///
/// Fails for [`Dialect::Unknown`], when the query fails, or when it does
/// not return a single text value.
pub fn current_database<C: Connection>(conn: &C, dialect: Dialect) -> Result<String> {
    let sql = match dialect {
        Dialect::MySql => "SELECT DATABASE()",
        Dialect::PostgreSql => "SELECT current_database()",
        Dialect::TSql => "SELECT DB_NAME()",
        Dialect::Unknown => return Err(ReflectError::UnsupportedDialect(dialect)),
    };
    let rows = run(conn, sql, &[])?;
    match rows.as_slice() {
        [row] => match row.as_slice() {
            [value] => text(value).ok_or_else(|| unexpected(sql, row)),
            _ => Err(unexpected(sql, row)),
        },
        _ => Err(ReflectError::UnexpectedRow {
            query: String::from(sql),
            row: format!("{} rows", rows.len()),
        }),
    }
}

/// Renders the `information_schema.columns` query listing every
/// `(table_name, column_name)` of `database`.
///
/// # Errors
///
/// Fails for [`Dialect::Unknown`].
pub fn columns_query(dialect: Dialect, database: &str) -> Result<(String, Vec<SqlValue>)> {
    let mut catalog = Catalog::new("information_schema");
    let columns = catalog.add_table(
        TableSchema::new("columns")
            .in_schema("information_schema")
            .columns([
                "table_catalog",
                "table_schema",
                "table_name",
                "column_name",
                "ordinal_position",
            ]),
    );
    let table_catalog = columns.c("table_catalog")?;
    let table_schema = columns.c("table_schema")?;

    let filter = match dialect {
        Dialect::MySql => BooleanValueExpression::from(equal(&table_schema, database)?),
        Dialect::PostgreSql => and_(
            equal(&table_catalog, database)?,
            equal(&table_schema, "public")?,
        )?,
        Dialect::TSql => and_(
            equal(&table_catalog, database)?,
            equal(&table_schema, "dbo")?,
        )?,
        Dialect::Unknown => return Err(ReflectError::UnsupportedDialect(dialect)),
    };

    let query = select((columns.c("table_name")?, columns.c("column_name")?))?
        .where_(filter)?
        .order_by((columns.c("table_name")?, columns.c("ordinal_position")?))?;
    Ok(Builder::new().with_dialect(dialect).string_args(&query))
}

/// Reflects `database` into a catalog.
///
/// # Errors
///
/// Fails for [`Dialect::Unknown`], when a query fails, or when a row is
/// not a pair of names.
pub fn reflect_database<C: Connection>(
    conn: &C,
    dialect: Dialect,
    database: &str,
) -> Result<Catalog> {
    let (sql, args) = columns_query(dialect, database)?;
    let mut tables: BTreeMap<String, TableSchema> = BTreeMap::new();
    for row in run(conn, &sql, &args)? {
        let [table, column] = row.as_slice() else {
            return Err(unexpected(&sql, &row));
        };
        let (Some(table), Some(column)) = (text(table), text(column)) else {
            return Err(unexpected(&sql, &row));
        };
        tables
            .entry(table)
            .or_insert_with_key(|name| TableSchema::new(name.as_str()))
            .add_column(column);
    }

    let mut catalog = Catalog::new(database).with_dialect(dialect);
    for schema in tables.into_values() {
        catalog.add_table(schema);
    }
    info!(database = %database, tables = catalog.len(), "reflected catalog");
    Ok(catalog)
}

/// Detects the dialect, finds the current database and reflects it.
///
/// # Errors
///
/// See [`current_database`] and [`reflect_database`].
pub fn reflect<C: Connection>(conn: &C) -> Result<Catalog> {
    let dialect = detect_dialect(conn);
    let database = current_database(conn, dialect)?;
    reflect_database(conn, dialect, &database)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct FakeError;

    impl fmt::Display for FakeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl std::error::Error for FakeError {}

    struct FakeConnection {
        driver: &'static str,
        database: Vec<Row>,
        columns: Vec<Row>,
        seen: RefCell<Vec<(String, Vec<SqlValue>)>>,
    }

    impl FakeConnection {
        fn new(driver: &'static str, columns: &[(&str, &str)]) -> Self {
            Self {
                driver,
                database: vec![vec![SqlValue::Text(String::from("app"))]],
                columns: columns
                    .iter()
                    .map(|(t, c)| {
                        vec![SqlValue::Text(String::from(*t)), SqlValue::Text(String::from(*c))]
                    })
                    .collect(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Connection for FakeConnection {
        type Error = FakeError;
        type Rows = Vec<Row>;

        fn query(&self, sql: &str, params: &[SqlValue]) -> std::result::Result<Vec<Row>, FakeError> {
            self.seen
                .borrow_mut()
                .push((String::from(sql), params.to_vec()));
            if self.driver == "broken" {
                return Err(FakeError);
            }
            if sql.contains("information_schema") {
                Ok(self.columns.clone())
            } else {
                Ok(self.database.clone())
            }
        }

        fn driver_type_name(&self) -> &str {
            self.driver
        }
    }

    #[test]
    fn test_reflect_mysql() {
        let conn = FakeConnection::new(
            "mysql",
            &[("users", "id"), ("users", "name"), ("articles", "id")],
        );
        let catalog = reflect(&conn).unwrap();
        assert_eq!(catalog.database_name(), "app");
        assert_eq!(catalog.dialect(), Dialect::MySql);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.table("users").unwrap().column_names(), ["id", "name"]);

        let seen = conn.seen.borrow();
        assert_eq!(seen[0].0, "SELECT DATABASE()");
        assert_eq!(
            seen[1].0,
            "SELECT columns.table_name, columns.column_name FROM information_schema.columns \
             WHERE columns.table_schema = ? \
             ORDER BY columns.table_name ASC, columns.ordinal_position ASC"
        );
        assert_eq!(seen[1].1, [SqlValue::Text(String::from("app"))]);
    }

    #[test]
    fn test_postgres_filters_public_schema() {
        let (sql, args) = columns_query(Dialect::PostgreSql, "app").unwrap();
        assert!(sql.contains("WHERE columns.table_catalog = $1 AND columns.table_schema = $2"));
        assert_eq!(
            args,
            [
                SqlValue::Text(String::from("app")),
                SqlValue::Text(String::from("public"))
            ]
        );
    }

    #[test]
    fn test_unknown_dialect() {
        let conn = FakeConnection::new("sqlite3", &[]);
        assert!(matches!(
            reflect(&conn),
            Err(ReflectError::UnsupportedDialect(Dialect::Unknown))
        ));
    }

    #[test]
    fn test_connection_error() {
        let conn = FakeConnection::new("broken", &[]);
        let err = current_database(&conn, Dialect::MySql).unwrap_err();
        assert_eq!(err.to_string(), "Connection error: connection refused");
    }

    #[test]
    fn test_malformed_row() {
        let mut conn = FakeConnection::new("postgres", &[]);
        conn.columns = vec![vec![SqlValue::Int(1)]];
        assert!(matches!(
            reflect(&conn),
            Err(ReflectError::UnexpectedRow { .. })
        ));
    }
}
