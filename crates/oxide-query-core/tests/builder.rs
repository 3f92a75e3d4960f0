//! Builder options: dialects, clause separator and prefix.

mod common;
use common::*;

use oxide_query_core::compose::{equal, or_, select};
use oxide_query_core::{Builder, BuilderOptions, Dialect, SqlValue};

#[test]
fn test_postgres_numbers_in_emission_order() {
    let f = fixture();
    let u_name = f.users.c("name").unwrap();
    let query = select((f.users.c("id").unwrap(), &u_name))
        .unwrap()
        .where_(or_(equal(&u_name, "foo").unwrap(), equal(&u_name, "bar").unwrap()).unwrap())
        .unwrap()
        .limit_with_offset(10, 20);
    let (sql, args) = postgres(&query);
    assert_eq!(
        sql,
        "SELECT users.id, users.name FROM users \
         WHERE (users.name = $1 OR users.name = $2) LIMIT $3 OFFSET $4"
    );
    assert_eq!(
        args,
        [text("foo"), text("bar"), SqlValue::UInt(10), SqlValue::UInt(20)]
    );
}

#[test]
fn test_tsql_and_unknown_use_question_marks() {
    let f = fixture();
    let query = select(f.users.c("id").unwrap())
        .unwrap()
        .where_(equal(f.users.c("id").unwrap(), 1).unwrap())
        .unwrap();
    for dialect in [Dialect::TSql, Dialect::Unknown] {
        let sql = Builder::new().with_dialect(dialect).string(&query);
        assert_eq!(sql, "SELECT users.id FROM users WHERE users.id = ?");
    }
}

#[test]
fn test_newline_separated_clauses() {
    let f = fixture();
    let a_author = f.articles.c("author").unwrap();
    let query = select(f.articles.c("id").unwrap())
        .unwrap()
        .join(&f.users, equal(&a_author, f.users.c("id").unwrap()).unwrap())
        .unwrap()
        .where_(equal(&a_author, 1).unwrap())
        .unwrap()
        .limit(2);
    let sql = Builder::new()
        .with_format_separate_clause_with("\n")
        .string(&query);
    assert_eq!(
        sql,
        "SELECT articles.id\nFROM articles\nJOIN users ON articles.author = users.id\n\
         WHERE articles.author = ?\nLIMIT ?"
    );
}

#[test]
fn test_prefix_is_prepended() {
    let f = fixture();
    let sql = Builder::new()
        .with_format_prefix_with("EXPLAIN ")
        .string(&select(&f.article_states).unwrap());
    assert_eq!(sql, "EXPLAIN SELECT article_states.id, article_states.name FROM article_states");
}

#[test]
fn test_options_from_config() {
    let options: BuilderOptions = serde_json::from_str(
        r#"{"dialect": "postgresql", "separate_clause_with": "\n", "prefix_with": "-- q\n"}"#,
    )
    .unwrap();
    let f = fixture();
    let sql = Builder::from_options(options).string(&f.users.delete_all());
    assert_eq!(sql, "-- q\nDELETE FROM users");
}

#[test]
fn test_catalog_dialect_drives_builder() {
    let catalog = oxide_query_core::Catalog::new("app").with_dialect(Dialect::PostgreSql);
    let builder = Builder::new().with_dialect(catalog.dialect());
    assert_eq!(builder.dialect(), Dialect::PostgreSql);
    assert_eq!(Dialect::from_driver_name("postgres"), Dialect::PostgreSql);
    assert_eq!(Dialect::from_driver_name("mysql"), Dialect::MySql);
}
