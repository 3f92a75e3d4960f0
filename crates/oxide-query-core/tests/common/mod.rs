//! Shared catalog fixture.

#![allow(dead_code)]

use oxide_query_core::meta::{Catalog, Table, TableSchema};
use oxide_query_core::builder::Emit;
use oxide_query_core::grammar::Walk;
use oxide_query_core::{Builder, Dialect, SqlValue};

pub struct Fixture {
    pub catalog: Catalog,
    pub users: Table,
    pub articles: Table,
    pub article_states: Table,
    pub user_profiles: Table,
    pub organizations: Table,
    pub organization_users: Table,
}

pub fn fixture() -> Fixture {
    let mut catalog = Catalog::new("test");
    let users = catalog.add_table(TableSchema::new("users").columns(["created_on", "id", "name"]));
    let articles =
        catalog.add_table(TableSchema::new("articles").columns(["author", "id", "state"]));
    let article_states =
        catalog.add_table(TableSchema::new("article_states").columns(["id", "name"]));
    let user_profiles =
        catalog.add_table(TableSchema::new("user_profiles").columns(["content", "user"]));
    let organizations = catalog.add_table(TableSchema::new("organizations").columns([
        "id",
        "nested_set_left",
        "nested_set_right",
        "parent_organization_id",
        "root_organization_id",
        "uuid",
    ]));
    let organization_users = catalog.add_table(
        TableSchema::new("organization_users").columns(["organization_id", "user_id"]),
    );
    Fixture {
        catalog,
        users,
        articles,
        article_states,
        user_profiles,
        organizations,
        organization_users,
    }
}

pub fn mysql<S: Walk + Emit>(statement: &S) -> (String, Vec<SqlValue>) {
    Builder::new().string_args(statement)
}

pub fn postgres<S: Walk + Emit>(statement: &S) -> (String, Vec<SqlValue>) {
    Builder::new()
        .with_dialect(Dialect::PostgreSql)
        .string_args(statement)
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
