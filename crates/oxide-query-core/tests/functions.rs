//! Function calls inside full statements.

mod common;
use common::*;

use oxide_query_core::compose::{
    add, convert, current_timestamp, equal, local_time, local_timestamp, lower, regex_substring,
    select, substring, translate, trim, upper,
};
use oxide_query_core::grammar::CharLengthUnits;
use oxide_query_core::{Error, SqlValue};

#[test]
fn test_string_functions_bring_their_table() {
    let f = fixture();
    let name = f.users.c("name").unwrap();
    let query = select((upper(&name).unwrap().as_("shout"), trim(&name, "x").unwrap()))
        .unwrap()
        .where_(equal(lower(&name).unwrap(), "bob").unwrap())
        .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT UPPER(users.name) AS shout, TRIM(BOTH ? FROM users.name) FROM users \
         WHERE LOWER(users.name) = ?"
    );
    assert_eq!(args, [text("x"), text("bob")]);
}

#[test]
fn test_substring_binds_bounds() {
    let f = fixture();
    let call = substring(f.users.c("name").unwrap(), 2_u64)
        .unwrap()
        .for_(3_u64)
        .unwrap()
        .using(CharLengthUnits::Characters);
    let (sql, args) = postgres(&select(call).unwrap());
    assert_eq!(
        sql,
        "SELECT SUBSTRING(users.name FROM $1 FOR $2 USING CHARACTERS) FROM users"
    );
    assert_eq!(args, [SqlValue::UInt(2), SqlValue::UInt(3)]);
}

#[test]
fn test_datetime_function_needs_no_from() {
    let query = select(current_timestamp().precision(3).as_("now")).unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(sql, "SELECT CURRENT_TIMESTAMP(3) AS now");
    assert!(args.is_empty());
}

#[test]
fn test_table_count() {
    let f = fixture();
    let all = select(f.users.count(()).unwrap()).unwrap();
    assert_eq!(mysql(&all).0, "SELECT COUNT(*) FROM users");

    let names = select(f.users.count(f.users.c("name").unwrap()).unwrap().distinct()).unwrap();
    assert_eq!(mysql(&names).0, "SELECT COUNT(DISTINCT users.name) FROM users");

    let err = f
        .users
        .count((f.users.c("id").unwrap(), f.users.c("name").unwrap()))
        .unwrap_err();
    assert!(matches!(err, Error::Misuse(_)));
}

#[test]
fn test_arithmetic_in_where() {
    let f = fixture();
    let id = f.organizations.c("id").unwrap();
    let parent = f.organizations.c("parent_organization_id").unwrap();
    let query = select(&id)
        .unwrap()
        .where_(equal(add(&id, 1).unwrap(), &parent).unwrap())
        .unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT organizations.id FROM organizations \
         WHERE organizations.id + ? = organizations.parent_organization_id"
    );
}

#[test]
fn test_regex_substring_binds_pattern_and_escape() {
    let f = fixture();
    let name = f.users.c("name").unwrap();
    let query = select(regex_substring(&name, "%a#_%", "#").unwrap().as_("m")).unwrap();
    let (sql, args) = postgres(&query);
    assert_eq!(
        sql,
        "SELECT SUBSTRING(users.name SIMILAR $1 ESCAPE $2) AS m FROM users"
    );
    assert_eq!(args, [text("%a#_%"), text("#")]);
}

#[test]
fn test_convert_and_translate() {
    let f = fixture();
    let name = f.users.c("name").unwrap();
    let query = select((
        convert(&name, "utf8mb4").unwrap().as_("c"),
        translate(&name, "latin1_to_ascii").unwrap().as_("t"),
    ))
    .unwrap()
    .where_(equal(convert(&name, "utf8mb4").unwrap(), "bob").unwrap())
    .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT CONVERT(users.name USING utf8mb4) AS c, \
         TRANSLATE(users.name USING latin1_to_ascii) AS t FROM users \
         WHERE CONVERT(users.name USING utf8mb4) = ?"
    );
    assert_eq!(args, [text("bob")]);

    assert!(matches!(
        convert(&name, "utf8) FROM users; --"),
        Err(Error::Misuse(_))
    ));
    assert!(matches!(translate(&name, "a b"), Err(Error::Misuse(_))));
}

#[test]
fn test_local_time_functions() {
    let query = select((
        local_time().as_("t"),
        local_timestamp().precision(2).as_("ts"),
    ))
    .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(sql, "SELECT LOCALTIME AS t, LOCALTIMESTAMP(2) AS ts");
    assert!(args.is_empty());
}
