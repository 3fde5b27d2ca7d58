//! End-to-end layout of rendered statements.

mod common;
use common::*;

use oxide_sqlfmt_core::{format_with, FormatOptions, KeywordCase};

#[test]
fn layout_aligned_aliases() {
    let sql = "SELECT id AS user_id, name AS user_name, email FROM users u \
               WHERE active = 1 AND name LIKE 'a%' ORDER BY name LIMIT 10";
    assert_eq!(
        format_ok(sql),
        "select id   as user_id,\n\
         \x20      name as user_name,\n\
         \x20      email\n\
         \x20 from users u\n\
         \x20where active = 1\n\
         \x20  and name LIKE 'a%'\n\
         \x20order by name\n\
         \x20limit 10"
    );
}

#[test]
fn layout_left_join() {
    let sql = "select * from t1 left join t2 on t1.id = t2.id where t1.x = 1";
    assert_eq!(
        format_ok(sql),
        "select *\n  from t1\n  left join t2\n    on t1.id = t2.id\n where t1.x = 1"
    );
}

#[test]
fn layout_nested_from_subquery() {
    assert_eq!(
        format_ok("select * from (select a from t1) x"),
        "select *\n  from (select a\n          from t1) x"
    );
}

#[test]
fn layout_two_levels_of_nesting() {
    assert_eq!(
        format_ok("select * from (select * from (select a from t where a > 1) y) x"),
        "select *\n  from (select *\n          from (select a\n                  from t\n                 where a > 1) y) x"
    );
}

#[test]
fn layout_join_subquery() {
    assert_eq!(
        format_ok("select * from t1 left join (select b from t2) y on t1.id = y.id"),
        "select *\n  from t1\n  left join\n       (select b\n          from t2) y\n    on t1.id = y.id"
    );
}

#[test]
fn layout_group_having() {
    assert_eq!(
        format_ok(
            "select dept, count(*) n from staff group by dept having count(*) > 5 order by n desc",
        ),
        "select dept, count(*) as n\n  from staff\n group by dept\nhaving count(*) > 5\n order by n desc"
    );
}

#[test]
fn layout_join_kinds_and_using() {
    assert_eq!(
        format_ok(
            "select * from a inner join b using (id) cross join c full outer join d on c.x = d.x",
        ),
        "select *\n  from a\n inner join b\n using (id)\n cross join c\n  full join d\n    on c.x = d.x"
    );
}

#[test]
fn layout_comma_items_render_as_cross_joins() {
    assert_eq!(
        format_ok("select * from a, b where a.id = b.id"),
        "select *\n  from a\n cross join b\n where a.id = b.id"
    );
}

#[test]
fn layout_distinct_and_limit_offset() {
    assert_eq!(
        format_ok("SELECT DISTINCT a FROM t LIMIT 5 OFFSET 10"),
        "select distinct a\n  from t\n limit 5 OFFSET 10"
    );
}

#[test]
fn layout_standalone_offset() {
    assert_eq!(
        format_ok("select a from t order by a offset 20"),
        "select a\n  from t\n order by a\noffset 20"
    );
}

#[test]
fn layout_upper_case_keywords() {
    let options = FormatOptions::new().keyword_case(KeywordCase::Upper);
    assert_eq!(
        format_with("select a as x, b as y from t where a = 1 and b = 2", &options).unwrap(),
        "SELECT a AS x,\n       b AS y\n  FROM t\n WHERE a = 1\n   AND b = 2"
    );
}

#[test]
fn layout_order_by_wraps_at_width() {
    let options = FormatOptions::new().max_line_width(30);
    assert_eq!(
        format_with(
            "select * from t order by first_name, last_name, created_at desc",
            &options
        )
        .unwrap(),
        "select *\n  from t\n order by first_name,\n          last_name,\n          created_at desc"
    );
}

#[test]
fn predicates_survive_formatting() {
    let sql = "select a from t where  x.y   >=  3 and lower(name) like  'a%'";
    let out = format_ok(sql);
    assert!(out.contains(&squash("x.y >= 3")));
    assert!(out.contains("lower(name) like 'a%'"));
}

#[test]
fn formatting_is_idempotent() {
    let statements = [
        "select a from t",
        "SELECT id AS user_id, name AS user_name, email FROM users u WHERE active = 1",
        "select * from t1 left join t2 on t1.id = t2.id where t1.x = 1",
        "select * from (select a from t1) x",
        "select * from t1 join (select b, c as d from t2 where c > 0) y on t1.id = y.b",
        "select dept, count(*) n from staff group by dept having count(*) > 5",
        "select distinct a from t order by a desc limit 10 offset 5",
        "select * from a, b, c where a.id = b.id and b.id = c.id",
        "select a from t where x between 1 and 5 and y = 'z'",
        "select \"Weird Col\" from `tbl` where s = 'it''s'",
    ];
    for sql in statements {
        round_trip(sql);
    }
}

#[test]
fn reparsing_output_gives_same_statement() {
    let statements = [
        "SELECT id AS user_id, name AS user_name FROM users u LEFT OUTER JOIN orders o ON u.id = o.uid",
        "select * from (select a, b x from t where a = 'q') s where s.x > 1",
        "select a, count(*) from t group by a having count(*) > 1 order by a limit 3",
    ];
    for sql in statements {
        assert_eq!(parse_ok(&format_ok(sql)), parse_ok(sql), "{sql}");
    }
}
