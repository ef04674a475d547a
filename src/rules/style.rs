use indexmap::IndexSet;
use regex::{NoExpand, Regex};

use super::{
    Rule, RuleCategory, RuleInfo, RuleOutcome,
    patterns::{
        EXPLICIT_ALIAS, FROM_TABLE, JOIN_TABLE, ORDER_BY_COLUMN, SELECT_STAR, WHERE_COLUMN,
        all_captures, first_capture
    },
    tables::KnownTable
};
use crate::error::{AppResult, rule_error};

const SELECT_STAR_WARNING: &str =
    "SELECT * is used - consider specifying only needed columns for better performance";

/// SELECT * is replaced with an explicit column list
pub struct SelectStar;

impl Rule for SelectStar {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE001",
            name:     "SELECT * usage",
            category: RuleCategory::Style
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        if !SELECT_STAR.is_match(sql) {
            return Ok(None);
        }
        let Some(table) = first_capture(&FROM_TABLE, sql) else {
            return Ok(Some(RuleOutcome::warn(SELECT_STAR_WARNING)));
        };
        let columns = suggest_columns(KnownTable::from_name(table), sql).join(", ");
        let replacement = format!("SELECT {}", columns);
        let optimized = SELECT_STAR.replace_all(sql, NoExpand(&replacement));
        Ok(Some(RuleOutcome::rewrite(
            format!("{}. Suggested: {}", SELECT_STAR_WARNING, columns),
            optimized
        )))
    }
}

/// Columns referenced in WHERE/ORDER BY followed by the table defaults,
/// first occurrence wins.
fn suggest_columns(table: KnownTable, sql: &str) -> Vec<String> {
    let mut columns: IndexSet<String> = all_captures(&WHERE_COLUMN, sql)
        .into_iter()
        .chain(all_captures(&ORDER_BY_COLUMN, sql))
        .map(str::to_string)
        .collect();
    let has_referenced = !columns.is_empty();
    for column in table.default_columns(has_referenced) {
        columns.insert((*column).to_string());
    }
    columns.into_iter().collect()
}

/// Statements touching several tables without aliases
pub struct TableAliases;

impl Rule for TableAliases {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE002",
            name:     "Missing table aliases",
            category: RuleCategory::Style
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        let mut references = all_captures(&FROM_TABLE, sql);
        references.extend(all_captures(&JOIN_TABLE, sql));
        if references.len() <= 2 || EXPLICIT_ALIAS.is_match(sql) {
            return Ok(None);
        }
        // Every reference gets the next letter, repeats included; each
        // substitution hits the first occurrence of the name in the text.
        let mut optimized = sql.to_string();
        for (index, table) in references.into_iter().enumerate() {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(table)))
                .map_err(|e| rule_error(self.info().id, e.to_string()))?;
            let replacement = format!("{} AS {}", table, alias_letter(index));
            optimized = pattern
                .replacen(&optimized, 1, NoExpand(&replacement))
                .into_owned();
        }
        Ok(Some(RuleOutcome::rewrite(
            "Multiple table references detected - consider using table aliases for clarity",
            optimized
        )))
    }
}

/// `a`, `b`, `c`, ... by position; past `z` the next code points are used
/// as-is.
fn alias_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from(b'a') + i))
        .unwrap_or('?')
}
