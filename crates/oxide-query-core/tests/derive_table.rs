//! `#[derive(Table)]` registration.

mod common;
use common::*;

use oxide_query_core::compose::{equal, select};
use oxide_query_core::meta::TableDefinition;
use oxide_query_core::Catalog;
use oxide_query_derive::Table;

#[derive(Table)]
struct UserProfile {
    content: String,
    #[column(name = "user")]
    user_id: i64,
    #[column(skip)]
    cached: bool,
}

#[derive(Table)]
#[table(name = "organizations", schema = "app")]
struct Org {
    id: i64,
    root_organization_id: i64,
}

#[test]
fn test_generated_constants() {
    assert_eq!(UserProfile::TABLE_NAME, "user_profile");
    assert_eq!(UserProfile::COLUMNS, ["content", "user"]);
    assert_eq!(Org::TABLE_NAME, "organizations");
}

#[test]
fn test_generated_schema() {
    let schema = Org::table_schema();
    assert_eq!(schema.name(), "organizations");
    assert_eq!(schema.schema(), Some("app"));
    assert_eq!(schema.column_names(), ["id", "root_organization_id"]);
}

#[test]
fn test_registered_table_composes() {
    let mut catalog = Catalog::new("test");
    let profiles = catalog.register::<UserProfile>();
    let orgs = catalog.register::<Org>();
    assert_eq!(catalog.table("USER_PROFILE").unwrap(), profiles);
    assert!(profiles.c("cached").is_err());

    let query = select(&profiles)
        .unwrap()
        .where_(equal(profiles.c("user").unwrap(), 1).unwrap())
        .unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT user_profile.content, user_profile.user FROM user_profile \
         WHERE user_profile.user = ?"
    );
    assert_eq!(
        mysql(&select(orgs.c("id").unwrap()).unwrap()).0,
        "SELECT organizations.id FROM app.organizations"
    );
}
