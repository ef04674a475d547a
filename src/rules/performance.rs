use regex::{NoExpand, Regex};

use super::{
    Rule, RuleCategory, RuleInfo, RuleOutcome,
    patterns::{
        DISTINCT, DISTINCT_WITH_SPACE, FROM_TABLE, IN_LIST, LIMIT, ORDER_BY,
        QUALIFIED_INT_EQUALITY, SELECT_LIST, WHERE_COLUMN, WHERE_EQUALITY, first_capture
    }
};
use crate::error::{AppResult, rule_error};

/// IN lists longer than this are reported
const MAX_IN_VALUES: usize = 10;

/// Values per statement in the chunked rewrite
const CHUNK_SIZE: usize = 5;

/// Number of UNION-ed statements in the chunked rewrite
const CHUNK_STATEMENTS: usize = 3;

/// Row bound appended to unbounded ordered queries
const DEFAULT_ROW_LIMIT: u32 = 100;

/// Projection used by the chunked rewrite when none can be extracted
const FALLBACK_COLUMNS: &str = "id, name, email";

/// IN clause with many values
///
/// Only the first `IN (...)` of a statement is inspected.
pub struct LargeInClause;

impl Rule for LargeInClause {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF001",
            name:     "Large IN clause",
            category: RuleCategory::Performance
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        let Some(list) = first_capture(&IN_LIST, sql) else {
            return Ok(None);
        };
        let values: Vec<&str> = list.split(',').map(str::trim).collect();
        if values.len() <= MAX_IN_VALUES {
            return Ok(None);
        }
        let count = values.len();
        let column = first_capture(&WHERE_COLUMN, sql);

        if let (Some((min, max)), Some(column)) = (sequential_range(&values), column) {
            let pattern = Regex::new(&format!(
                r"(?i)\bWHERE\s+{}\s+IN\s*\([^)]+\)",
                regex::escape(column)
            ))
            .map_err(|e| rule_error(self.info().id, e.to_string()))?;
            let replacement = format!("WHERE {} BETWEEN {} AND {}", column, min, max);
            let optimized = pattern.replace_all(sql, NoExpand(&replacement));
            return Ok(Some(RuleOutcome::rewrite(
                format!(
                    "IN clause contains {} sequential values - consider using BETWEEN {} AND {} for better performance",
                    count, min, max
                ),
                optimized
            )));
        }

        if let (Some(table), Some(column)) = (first_capture(&FROM_TABLE, sql), column) {
            let select_columns = first_capture(&SELECT_LIST, sql)
                .map(str::trim)
                .unwrap_or(FALLBACK_COLUMNS);
            return Ok(Some(RuleOutcome::rewrite(
                format!(
                    "IN clause contains {} values - consider breaking into smaller chunks or using BETWEEN if sequential",
                    count
                ),
                chunked_rewrite(select_columns, table, column, &values)
            )));
        }

        Ok(Some(RuleOutcome::warn(format!(
            "IN clause contains {} values - consider using BETWEEN if sequential or breaking into smaller chunks",
            count
        ))))
    }
}

/// Bounds of a list of non-negative integers forming a contiguous run.
fn sequential_range(values: &[&str]) -> Option<(u64, u64)> {
    let mut numbers = values
        .iter()
        .map(|v| {
            if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) {
                v.parse::<u64>().ok()
            } else {
                None
            }
        })
        .collect::<Option<Vec<_>>>()?;
    numbers.sort_unstable();
    let (&min, &max) = (numbers.first()?, numbers.last()?);
    (max - min == numbers.len() as u64 - 1).then_some((min, max))
}

/// Advisory script splitting the IN list into UNION-ed statements, with a
/// commented-out temporary table alternative.
fn chunked_rewrite(select_columns: &str, table: &str, column: &str, values: &[&str]) -> String {
    let unions = values
        .chunks(CHUNK_SIZE)
        .take(CHUNK_STATEMENTS)
        .map(|chunk| {
            format!(
                "SELECT {} FROM {}\nWHERE {} IN ({})",
                select_columns,
                table,
                column,
                chunk.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\nUNION\n");
    let rows = values
        .iter()
        .map(|v| format!("({})", v))
        .collect::<Vec<_>>()
        .join(", ");
    [
        "-- Break large IN clause into smaller chunks for better performance".to_string(),
        "-- Option 1: Use UNION of smaller IN clauses".to_string(),
        unions,
        format!("ORDER BY name LIMIT {};", DEFAULT_ROW_LIMIT),
        String::new(),
        "-- Option 2: Use EXISTS with a temporary table (for very large datasets)".to_string(),
        "-- CREATE TEMPORARY TABLE temp_ids (id INT);".to_string(),
        format!("-- INSERT INTO temp_ids VALUES {};", rows),
        format!("-- SELECT {} FROM {} t", select_columns, table),
        format!(
            "-- WHERE EXISTS (SELECT 1 FROM temp_ids ti WHERE ti.id = t.{})",
            column
        ),
        format!("-- ORDER BY name LIMIT {};", DEFAULT_ROW_LIMIT),
    ]
    .join("\n")
}

/// ORDER BY without LIMIT
pub struct OrderByWithoutLimit;

impl Rule for OrderByWithoutLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF002",
            name:     "ORDER BY without LIMIT",
            category: RuleCategory::Performance
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        if ORDER_BY.is_match(sql) && !LIMIT.is_match(sql) {
            let optimized = format!("{} LIMIT {};", sql.trim_end_matches(';'), DEFAULT_ROW_LIMIT);
            return Ok(Some(RuleOutcome::rewrite(
                "ORDER BY used without LIMIT - consider adding LIMIT to control result size",
                optimized
            )));
        }
        Ok(None)
    }
}

/// DISTINCT next to an equality on a qualified column
pub struct UnnecessaryDistinct;

impl Rule for UnnecessaryDistinct {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF003",
            name:     "Unnecessary DISTINCT",
            category: RuleCategory::Performance
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        if DISTINCT.is_match(sql) && QUALIFIED_INT_EQUALITY.is_match(sql) {
            let optimized = DISTINCT_WITH_SPACE.replace_all(sql, "");
            return Ok(Some(RuleOutcome::rewrite(
                "DISTINCT used with unique constraint - may be unnecessary",
                optimized
            )));
        }
        Ok(None)
    }
}

/// Equality filter that would benefit from an index
pub struct IndexHint;

impl Rule for IndexHint {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF004",
            name:     "Index suggestion",
            category: RuleCategory::Performance
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        if WHERE_EQUALITY.is_match(sql) {
            return Ok(Some(RuleOutcome::warn(
                "Consider adding appropriate indexes for columns used in WHERE clauses"
            )));
        }
        Ok(None)
    }
}
