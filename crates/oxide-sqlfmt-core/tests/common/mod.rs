#![allow(dead_code)]

use oxide_sqlfmt_core::{format, parse, ParseError, Statement};

pub fn parse_ok(sql: &str) -> Statement {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn format_ok(sql: &str) -> String {
    format(sql).unwrap_or_else(|e| panic!("Failed to format: {sql}\nError: {e:?}"))
}

/// Verifies that formatting is a fixed point: formatting the formatted
/// text yields the same text again.
pub fn round_trip(sql: &str) {
    let rendered1 = format_ok(sql);
    let rendered2 = format_ok(&rendered1);
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

/// Collapses whitespace so predicates can be compared to their source.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
