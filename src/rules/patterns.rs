//! Compiled text patterns shared by the built-in rules.
//!
//! Rules work on statement text, not on the parsed tree, so every pattern
//! here is case-insensitive and tolerant of arbitrary whitespace between
//! keywords.

use std::sync::LazyLock;

use regex::Regex;

/// `SELECT *`, possibly spread over several lines.
pub static SELECT_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)SELECT\s+\*").expect("valid regex"));

/// Table name following `FROM`.
pub static FROM_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFROM\s+(\w+)").expect("valid regex"));

/// Table name following `JOIN`.
pub static JOIN_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\s+(\w+)").expect("valid regex"));

/// First identifier after `WHERE`.
pub static WHERE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\s+(\w+)").expect("valid regex"));

/// First identifier after `ORDER BY`.
pub static ORDER_BY_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\s+(\w+)").expect("valid regex"));

/// Projection list between `SELECT` and `FROM`.
pub static SELECT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bSELECT\s+(.+?)\s+FROM\b").expect("valid regex"));

/// Statement that mutates rows of a table, after any leading comments.
pub static MUTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(?:(?:--[^\n]*|/\*.*?\*/)\s*)*(?:DELETE\s+FROM|UPDATE)\s+\w+")
        .expect("valid regex")
});

pub static WHERE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").expect("valid regex"));

/// Contents of the first `IN (...)` list.
pub static IN_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bIN\s*\(([^)]+)\)").expect("valid regex"));

pub static ORDER_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").expect("valid regex"));

pub static LIMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));

pub static DISTINCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDISTINCT\b").expect("valid regex"));

/// `DISTINCT` together with its trailing whitespace, for removal.
pub static DISTINCT_WITH_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDISTINCT\s+").expect("valid regex"));

/// `WHERE alias.column = 42`
pub static QUALIFIED_INT_EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bWHERE\s+\w+\.\w+\s*=\s*\d+").expect("valid regex")
});

/// Any `AS alias` already present in the statement.
pub static EXPLICIT_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAS\s+\w+").expect("valid regex"));

/// `WHERE column = value`
pub static WHERE_EQUALITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\s+\w+\s*=\s*\w+").expect("valid regex"));

/// First capture group of the first match, if any.
pub fn first_capture<'a>(re: &Regex, sql: &'a str) -> Option<&'a str> {
    re.captures(sql)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// First capture group of every match, in textual order.
pub fn all_captures<'a>(re: &Regex, sql: &'a str) -> Vec<&'a str> {
    re.captures_iter(sql)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}
