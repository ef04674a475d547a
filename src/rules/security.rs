use super::{
    Rule, RuleCategory, RuleInfo, RuleOutcome,
    patterns::{MUTATION, WHERE_KEYWORD}
};
use crate::error::AppResult;

/// DELETE or UPDATE without WHERE
///
/// Never rewrites: there is no safe predicate to add on the user's behalf.
pub struct MissingWhere;

impl Rule for MissingWhere {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SEC001",
            name:     "Missing WHERE in DELETE/UPDATE",
            category: RuleCategory::Security
        }
    }

    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
        if MUTATION.is_match(sql) && !WHERE_KEYWORD.is_match(sql) {
            return Ok(Some(RuleOutcome::warn(
                "DELETE/UPDATE statement missing WHERE clause - this could affect all rows"
            )));
        }
        Ok(None)
    }
}
