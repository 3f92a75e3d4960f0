//! Selection features beyond the reference scenarios.

mod common;
use common::*;

use oxide_query_core::compose::{
    count, equal, greater_than, in_, less_than, not_in, select, sum,
};
use oxide_query_core::{Error, SqlValue};

#[test]
fn test_select_literal_has_no_from() {
    let (sql, args) = mysql(&select(1_u64).unwrap());
    assert_eq!(sql, "SELECT ?");
    assert_eq!(args, [SqlValue::UInt(1)]);
}

#[test]
fn test_group_by_having_order_by() {
    let f = fixture();
    let author = f.articles.c("author").unwrap();
    let total = count(f.articles.c("id").unwrap()).unwrap();
    let query = select((&author, total.as_("total")))
        .unwrap()
        .group_by(&author)
        .unwrap()
        .having(greater_than(total.clone(), 3).unwrap())
        .unwrap()
        .order_by(total.desc())
        .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT articles.author, COUNT(articles.id) AS total FROM articles \
         GROUP BY articles.author HAVING COUNT(articles.id) > ? \
         ORDER BY COUNT(articles.id) DESC"
    );
    assert_eq!(args, [SqlValue::Int(3)]);
}

#[test]
fn test_order_by_plain_column_is_ascending() {
    let f = fixture();
    let name = f.users.c("name").unwrap();
    let query = select(&name).unwrap().order_by(&name).unwrap().limit(5);
    let (sql, args) = mysql(&query);
    assert_eq!(sql, "SELECT users.name FROM users ORDER BY users.name ASC LIMIT ?");
    assert_eq!(args, [SqlValue::UInt(5)]);
}

#[test]
fn test_where_after_limit_still_targets_query() {
    let f = fixture();
    let id = f.users.c("id").unwrap();
    let query = select(&id)
        .unwrap()
        .limit(1)
        .where_(equal(&id, 7).unwrap())
        .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(sql, "SELECT users.id FROM users WHERE users.id = ? LIMIT ?");
    assert_eq!(args, [SqlValue::Int(7), SqlValue::UInt(1)]);
}

#[test]
fn test_count_replaces_select_list() {
    let f = fixture();
    let query = select(&f.users)
        .unwrap()
        .where_(equal(f.users.c("name").unwrap(), "foo").unwrap())
        .unwrap()
        .count();
    assert_eq!(
        mysql(&query).0,
        "SELECT COUNT(*) FROM users WHERE users.name = ?"
    );
}

#[test]
fn test_distinct_select() {
    let f = fixture();
    let query = select(f.articles.c("author").unwrap()).unwrap().distinct();
    assert_eq!(mysql(&query).0, "SELECT DISTINCT articles.author FROM articles");
}

#[test]
fn test_selection_as_derived_table() {
    let f = fixture();
    let inner = select((
        f.users.c("id").unwrap(),
        f.users.c("name").unwrap().as_("author"),
    ))
    .unwrap();
    let query = select(inner).unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT derived0.author, derived0.id FROM \
         (SELECT users.id, users.name AS author FROM users) AS derived0"
    );
}

#[test]
fn test_derived_counter_is_per_select_call() {
    let f = fixture();
    let inner = select(f.users.c("id").unwrap()).unwrap();
    let first = select((&inner, &inner)).unwrap();
    assert_eq!(
        mysql(&first).0,
        "SELECT derived0.id, derived1.id FROM (SELECT users.id FROM users) AS derived0, \
         (SELECT users.id FROM users) AS derived1"
    );
    let second = select(&inner).unwrap();
    assert!(mysql(&second).0.ends_with("AS derived0"));
}

#[test]
fn test_named_selection_joins_by_column() {
    let f = fixture();
    let authors = select(f.articles.c("author").unwrap())
        .unwrap()
        .named("authors");
    let u_id = f.users.c("id").unwrap();
    let query = select(f.users.c("name").unwrap())
        .unwrap()
        .join(&authors, equal(authors.c("author").unwrap(), &u_id).unwrap())
        .unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT users.name FROM users JOIN (SELECT articles.author FROM articles) AS authors \
         ON authors.author = users.id"
    );
}

#[test]
fn test_as_exposes_outer_columns() {
    let f = fixture();
    let derived = select(f.users.c("name").unwrap()).unwrap().as_("names").unwrap();
    let query = select(derived.c("NAME").unwrap()).unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT names.name FROM (SELECT users.name FROM users) AS names"
    );
}

#[test]
fn test_unnamed_selection_column_is_misuse() {
    let f = fixture();
    let inner = select(f.users.c("id").unwrap()).unwrap();
    assert!(matches!(inner.c("id"), Err(Error::Misuse(_))));
}

#[test]
fn test_scalar_subquery_in_select_list() {
    let f = fixture();
    let total = select(f.articles.c("id").unwrap()).unwrap().count().subquery();
    let query = select((f.users.c("id").unwrap(), total.as_("articles"))).unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT users.id, (SELECT COUNT(*) FROM articles) AS articles FROM users"
    );
}

#[test]
fn test_in_list_and_subquery() {
    let f = fixture();
    let u_id = f.users.c("id").unwrap();
    let authors = select(f.articles.c("author").unwrap()).unwrap();
    let query = select(&u_id)
        .unwrap()
        .where_(in_(&u_id, authors).unwrap())
        .unwrap()
        .where_(not_in(&u_id, (1, 2)).unwrap())
        .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT users.id FROM users WHERE users.id IN (SELECT articles.author FROM articles) \
         AND users.id NOT IN (?, ?)"
    );
    assert_eq!(args, [SqlValue::Int(1), SqlValue::Int(2)]);
}

#[test]
fn test_aggregate_brings_its_table() {
    let f = fixture();
    let query = select(sum(f.organizations.c("id").unwrap()).unwrap()).unwrap();
    assert_eq!(mysql(&query).0, "SELECT SUM(organizations.id) FROM organizations");
}

#[test]
fn test_chained_joins_lean_left() {
    let f = fixture();
    let user_id = f.organization_users.c("user_id").unwrap();
    let org_id = f.organization_users.c("organization_id").unwrap();
    let query = select(f.users.c("name").unwrap())
        .unwrap()
        .join(
            &f.organization_users,
            equal(&user_id, f.users.c("id").unwrap()).unwrap(),
        )
        .unwrap()
        .outer_join(
            &f.organizations,
            equal(f.organizations.c("id").unwrap(), &org_id).unwrap(),
        )
        .unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT users.name FROM users \
         JOIN organization_users ON organization_users.user_id = users.id \
         LEFT JOIN organizations ON organizations.id = organization_users.organization_id"
    );
}

#[test]
fn test_cross_join() {
    let f = fixture();
    let query = select(f.users.c("id").unwrap())
        .unwrap()
        .cross_join(&f.article_states)
        .unwrap();
    assert_eq!(mysql(&query).0, "SELECT users.id FROM users CROSS JOIN article_states");
}

#[test]
fn test_having_accumulates_with_and() {
    let f = fixture();
    let author = f.articles.c("author").unwrap();
    let total = count(f.articles.c("id").unwrap()).unwrap();
    let query = select((&author, total.as_("total")))
        .unwrap()
        .group_by(&author)
        .unwrap()
        .having(greater_than(total.clone(), 1).unwrap())
        .unwrap()
        .having(less_than(total, 10).unwrap())
        .unwrap();
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT articles.author, COUNT(articles.id) AS total FROM articles \
         GROUP BY articles.author HAVING COUNT(articles.id) > ? AND COUNT(articles.id) < ?"
    );
    assert_eq!(args, [SqlValue::Int(1), SqlValue::Int(10)]);
}

#[test]
fn test_right_and_full_joins() {
    let f = fixture();
    let condition = equal(f.articles.c("author").unwrap(), f.users.c("id").unwrap()).unwrap();

    let right = select(f.articles.c("id").unwrap())
        .unwrap()
        .right_join(&f.users, condition.clone())
        .unwrap();
    let (sql, args) = mysql(&right);
    assert_eq!(
        sql,
        "SELECT articles.id FROM articles RIGHT JOIN users ON articles.author = users.id"
    );
    assert!(args.is_empty());

    let full = select(f.articles.c("id").unwrap())
        .unwrap()
        .full_join(&f.users, condition)
        .unwrap()
        .where_(equal(f.users.c("name").unwrap(), "ann").unwrap())
        .unwrap();
    let (sql, args) = postgres(&full);
    assert_eq!(
        sql,
        "SELECT articles.id FROM articles FULL JOIN users ON articles.author = users.id \
         WHERE users.name = $1"
    );
    assert_eq!(args, [text("ann")]);
}

#[test]
fn test_natural_and_union_joins() {
    let f = fixture();
    let natural = select(f.users.c("id").unwrap())
        .unwrap()
        .natural_join(&f.user_profiles)
        .unwrap();
    assert_eq!(
        mysql(&natural),
        (String::from("SELECT users.id FROM users NATURAL JOIN user_profiles"), vec![])
    );

    let union = select(f.users.c("id").unwrap())
        .unwrap()
        .union_join(&f.article_states)
        .unwrap();
    assert_eq!(
        mysql(&union),
        (String::from("SELECT users.id FROM users UNION JOIN article_states"), vec![])
    );
}

#[test]
fn test_nulls_ordering() {
    let f = fixture();
    let query = select(f.users.c("id").unwrap())
        .unwrap()
        .order_by((
            f.users.c("id").unwrap().desc().nulls_first(),
            f.users.c("name").unwrap().asc().nulls_last(),
        ))
        .unwrap()
        .limit(5);
    let (sql, args) = mysql(&query);
    assert_eq!(
        sql,
        "SELECT users.id FROM users \
         ORDER BY users.id DESC NULLS FIRST, users.name ASC NULLS LAST LIMIT ?"
    );
    assert_eq!(args, [SqlValue::UInt(5)]);
}

#[test]
fn test_derived_function_gets_inner_alias() {
    let f = fixture();
    let inner = select(f.users.count(()).unwrap()).unwrap();
    let query = select(inner).unwrap();
    assert_eq!(
        mysql(&query).0,
        "SELECT derived0.count FROM (SELECT COUNT(*) AS count FROM users) AS derived0"
    );

    let totals = select((
        f.articles.c("author").unwrap(),
        count(f.articles.c("id").unwrap()).unwrap().as_("total"),
    ))
    .unwrap()
    .group_by(f.articles.c("author").unwrap())
    .unwrap()
    .as_("totals")
    .unwrap();
    assert_eq!(totals.c("total").unwrap().name(), "total");
}

#[test]
fn test_derived_duplicate_names_are_misuse() {
    let f = fixture();
    let condition = equal(f.articles.c("author").unwrap(), f.users.c("id").unwrap()).unwrap();
    let inner = select((f.articles.c("id").unwrap(), f.users.c("id").unwrap()))
        .unwrap()
        .join(&f.users, condition.clone())
        .unwrap();
    assert!(matches!(select(inner.clone()), Err(Error::Misuse(_))));
    assert!(matches!(inner.as_("pairs"), Err(Error::Misuse(_))));
    assert!(matches!(
        select(inner.named("pairs")).unwrap_err(),
        Error::Misuse(_)
    ));

    let aliased = select((
        f.articles.c("id").unwrap(),
        f.users.c("id").unwrap().as_("user_id"),
    ))
    .unwrap()
    .join(&f.users, condition)
    .unwrap();
    assert_eq!(
        mysql(&select(aliased).unwrap()).0,
        "SELECT derived0.id, derived0.user_id FROM \
         (SELECT articles.id, users.id AS user_id FROM articles JOIN users \
         ON articles.author = users.id) AS derived0"
    );
}
