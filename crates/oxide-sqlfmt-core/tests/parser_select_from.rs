//! Tests for the FROM clause: table references, aliases, subqueries, and
//! every JOIN kind.

mod common;
use common::*;

use oxide_sqlfmt_core::{Field, JoinKind, Table};

#[test]
fn from_simple_table() {
    let s = parse_ok("SELECT * FROM users");
    assert_eq!(s.from, Table::named("users"));
    assert!(s.joins.is_empty());
}

#[test]
fn from_table_with_as_alias() {
    let s = parse_ok("SELECT * FROM users AS u");
    assert_eq!(s.from, Table::named("users").alias("u"));
    round_trip("SELECT * FROM users AS u");
}

#[test]
fn from_table_with_bare_alias() {
    let s = parse_ok("SELECT * FROM users u");
    assert_eq!(s.from, Table::named("users").alias("u"));
}

#[test]
fn from_schema_qualified_table() {
    let s = parse_ok("SELECT * FROM public.users");
    assert_eq!(s.from, Table::named("public.users"));
}

#[test]
fn from_table_function() {
    let s = parse_ok("SELECT g FROM generate_series(1, 10) g");
    assert_eq!(s.from, Table::named("generate_series(1, 10)").alias("g"));
}

#[test]
fn from_subquery_with_alias() {
    let s = parse_ok("select * from (select a from t1) x");
    let query = s.from.query().expect("subquery");
    assert_eq!(query.fields, vec![Field::new("a")]);
    assert_eq!(query.from, Table::named("t1"));
    assert_eq!(query.nesting_depth, 1);
    assert_eq!(s.from.alias_name(), Some("x"));
}

#[test]
fn from_subquery_with_clauses() {
    let s = parse_ok(
        "SELECT t.id FROM (SELECT id FROM users WHERE active = 1 ORDER BY id LIMIT 5) AS t LIMIT 1",
    );
    let query = s.from.query().expect("subquery");
    assert_eq!(query.where_clause.len(), 1);
    assert_eq!(query.order_by, vec!["id"]);
    assert_eq!(query.limit.as_deref(), Some("5"));
    assert_eq!(s.limit.as_deref(), Some("1"));
    round_trip(
        "SELECT t.id FROM (SELECT id FROM users WHERE active = 1 ORDER BY id LIMIT 5) AS t LIMIT 1",
    );
}

#[test]
fn from_nested_subqueries() {
    let s = parse_ok("select * from (select * from (select a from t) y) x");
    let middle = s.from.query().expect("middle");
    let inner = middle.from.query().expect("inner");
    assert_eq!(middle.nesting_depth, 1);
    assert_eq!(inner.nesting_depth, 2);
    assert_eq!(inner.fields, vec![Field::new("a")]);
    round_trip("select * from (select * from (select a from t) y) x");
}

#[test]
fn from_subquery_join_not_split() {
    let s = parse_ok("select * from (select a from t1 join t2 on t1.id = t2.id) x where x.a = 1");
    assert!(s.joins.is_empty());
    assert_eq!(s.from.query().expect("subquery").joins.len(), 1);
}

#[test]
fn from_comma_separated_tables() {
    let s = parse_ok("SELECT * FROM a, b bb WHERE a.id = bb.id");
    assert_eq!(s.from, Table::named("a"));
    assert_eq!(s.joins.len(), 1);
    assert_eq!(s.joins[0].kind, JoinKind::Cross);
    assert_eq!(s.joins[0].table, Table::named("b").alias("bb"));
    assert_eq!(s.where_clause.len(), 1);
}

#[test]
fn join_left_with_where() {
    let s = parse_ok("select * from t1 left join t2 on t1.id = t2.id where t1.x = 1");
    assert_eq!(s.joins.len(), 1);
    assert_eq!(s.joins[0].kind, JoinKind::Left);
    assert_eq!(s.joins[0].table, Table::named("t2"));
    assert_eq!(s.joins[0].on_predicate.as_deref(), Some("t1.id = t2.id"));
    assert_eq!(s.where_clause.len(), 1);
    assert_eq!(s.where_clause[0].predicate, "t1.x = 1");
}

#[test]
fn join_kinds() {
    let cases = [
        ("JOIN", JoinKind::Plain),
        ("INNER JOIN", JoinKind::Inner),
        ("LEFT JOIN", JoinKind::Left),
        ("LEFT OUTER JOIN", JoinKind::Left),
        ("RIGHT JOIN", JoinKind::Right),
        ("RIGHT OUTER JOIN", JoinKind::Right),
        ("OUTER JOIN", JoinKind::Outer),
        ("FULL OUTER JOIN", JoinKind::Full),
    ];
    for (keyword, kind) in cases {
        let sql = format!("SELECT * FROM a {keyword} b ON a.id = b.id");
        let s = parse_ok(&sql);
        assert_eq!(s.joins.len(), 1, "{sql}");
        assert_eq!(s.joins[0].kind, kind, "{sql}");
        assert_eq!(s.joins[0].on_predicate.as_deref(), Some("a.id = b.id"));
        round_trip(&sql);
    }
}

#[test]
fn join_cross_without_on() {
    let s = parse_ok("SELECT * FROM a CROSS JOIN b");
    assert_eq!(s.joins[0].kind, JoinKind::Cross);
    assert!(s.joins[0].on_predicate.is_none());
}

#[test]
fn join_using() {
    let s = parse_ok("SELECT * FROM a JOIN b USING (id, tenant_id)");
    assert_eq!(s.joins[0].using, vec!["id", "tenant_id"]);
    assert!(s.joins[0].on_predicate.is_none());
    round_trip("SELECT * FROM a JOIN b USING (id, tenant_id)");
}

#[test]
fn join_multiple_preserve_order() {
    let s = parse_ok(
        "SELECT * FROM a \
         INNER JOIN b ON a.id = b.a_id \
         LEFT JOIN c cc ON b.id = cc.b_id AND cc.active = 1 \
         RIGHT JOIN d AS dd ON cc.id = dd.c_id",
    );
    let tables: Vec<_> = s.joins.iter().map(|j| j.table.name().unwrap_or("")).collect();
    assert_eq!(tables, vec!["b", "c", "d"]);
    let kinds: Vec<_> = s.joins.iter().map(|j| j.kind).collect();
    assert_eq!(kinds, vec![JoinKind::Inner, JoinKind::Left, JoinKind::Right]);
    assert_eq!(s.joins[1].table.alias_name(), Some("cc"));
    assert_eq!(
        s.joins[1].on_predicate.as_deref(),
        Some("b.id = cc.b_id AND cc.active = 1")
    );
    assert_eq!(s.joins[2].table.alias_name(), Some("dd"));
}

#[test]
fn join_subquery() {
    let s = parse_ok(
        "SELECT * FROM users u JOIN (SELECT user_id, count(*) n FROM orders GROUP BY user_id) o ON u.id = o.user_id",
    );
    let query = s.joins[0].table.query().expect("subquery");
    assert_eq!(query.group_by, vec!["user_id"]);
    assert_eq!(s.joins[0].table.alias_name(), Some("o"));
    assert_eq!(s.joins[0].on_predicate.as_deref(), Some("u.id = o.user_id"));
    round_trip(
        "SELECT * FROM users u JOIN (SELECT user_id, count(*) n FROM orders GROUP BY user_id) o ON u.id = o.user_id",
    );
}
