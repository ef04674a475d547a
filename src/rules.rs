//! Rule set for SQL statement analysis and rewriting.
//!
//! Each rule is a stateless check over statement text. A matching rule
//! yields a [`RuleOutcome`]: a warning and, optionally, a rewritten
//! statement. Rules are applied in a fixed order by the
//! [`Analyzer`](crate::engine::Analyzer), and every rewrite becomes the input
//! of the next rule, so the order below is part of the behaviour.
//!
//! | Order | ID | Rule | Rewrites |
//! |-------|----|------|----------|
//! | 1 | STYLE001 | [`SelectStar`](style::SelectStar) | `SELECT *` to explicit columns |
//! | 2 | SEC001 | [`MissingWhere`](security::MissingWhere) | never |
//! | 3 | PERF001 | [`LargeInClause`](performance::LargeInClause) | `BETWEEN` or chunked `UNION` |
//! | 4 | PERF002 | [`OrderByWithoutLimit`](performance::OrderByWithoutLimit) | appends `LIMIT 100;` |
//! | 5 | PERF003 | [`UnnecessaryDistinct`](performance::UnnecessaryDistinct) | drops `DISTINCT` |
//! | 6 | STYLE002 | [`TableAliases`](style::TableAliases) | adds `AS a`, `AS b`, ... |
//! | 7 | PERF004 | [`IndexHint`](performance::IndexHint) | never |
//!
//! Matching is textual. False positives and negatives are expected; rules
//! do not understand the grammar.
//!
//! # Configuration
//!
//! Rules can be disabled via [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["STYLE002"]
//! ```
//!
//! # Implementing Custom Rules
//!
//! ```
//! use sql_optimizer::{
//!     error::AppResult,
//!     rules::{Rule, RuleCategory, RuleInfo, RuleOutcome}
//! };
//!
//! pub struct MyRule;
//!
//! impl Rule for MyRule {
//!     fn info(&self) -> RuleInfo {
//!         RuleInfo {
//!             id:       "CUSTOM001",
//!             name:     "My custom rule",
//!             category: RuleCategory::Performance
//!         }
//!     }
//!
//!     fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>> {
//!         Ok(None)
//!     }
//! }
//! ```

mod patterns;
pub mod performance;
pub mod security;
pub mod style;
mod tables;
mod types;

pub use tables::KnownTable;
pub use types::{RuleCategory, RuleInfo, RuleOutcome};

use crate::{config::RulesConfig, error::AppResult};

/// Trait for implementing SQL analysis rules.
///
/// Rules hold no state between calls and must be `Send + Sync` so a single
/// [`RuleSet`] can serve concurrent requests.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Inspects a statement.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the rule does not match, `Ok(Some(outcome))` when it
    /// does, and `Err` when the rule itself failed. Failures are logged and
    /// skipped by the engine.
    fn apply(&self, sql: &str) -> AppResult<Option<RuleOutcome>>;
}

/// Ordered, immutable collection of rules.
///
/// Built once and shared by every analysis.
///
/// # Example
///
/// ```
/// use sql_optimizer::{config::RulesConfig, rules::RuleSet};
///
/// let config = RulesConfig {
///     disabled: vec!["STYLE002".into()]
/// };
///
/// let rules = RuleSet::with_config(&config);
/// assert_eq!(rules.len(), 6);
/// ```
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// Create a rule set with all built-in rules in their fixed order
    pub fn new() -> Self {
        Self::with_config(&RulesConfig::default())
    }

    /// Create a rule set without the rules disabled in configuration
    ///
    /// Relative order of the remaining rules is preserved.
    pub fn with_config(config: &RulesConfig) -> Self {
        let all_rules: Vec<Box<dyn Rule>> = vec![
            Box::new(style::SelectStar),
            Box::new(security::MissingWhere),
            Box::new(performance::LargeInClause),
            Box::new(performance::OrderByWithoutLimit),
            Box::new(performance::UnnecessaryDistinct),
            Box::new(style::TableAliases),
            Box::new(performance::IndexHint),
        ];
        let rules = all_rules
            .into_iter()
            .filter(|r| {
                !config
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(r.info().id))
            })
            .collect();
        Self::from_rules(rules)
    }

    /// Create a rule set from an explicit ordered list
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Rule ids in application order
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.info().id).collect()
    }
}
