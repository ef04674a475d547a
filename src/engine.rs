//! Analysis engine.
//!
//! ```text
//! ┌───────────┐     ┌───────────────┐     ┌──────────────┐     ┌────────────────┐
//! │ Statement │────▶│ SyntaxChecker │────▶│ RuleSet fold │────▶│ AnalysisResult │
//! └───────────┘     └───────────────┘     └──────────────┘     └────────────────┘
//! ```
//!
//! A statement that fails the syntax check is returned untouched with one
//! error. Otherwise the rule set is folded over the text: each rule sees the
//! output of every rewrite before it, warnings accumulate in rule order, and
//! the text left at the end of the fold is the optimized query.

use serde::{Deserialize, Serialize};

use crate::{
    rules::{Rule, RuleOutcome, RuleSet},
    syntax::{SyntaxChecker, UNPARSEABLE_MESSAGE}
};

/// Result of analyzing one statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub errors:          Vec<String>,
    pub warnings:        Vec<String>,
    pub optimized_query: String
}

impl AnalysisResult {
    /// `true` when the statement passed the syntax check
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Accumulator threaded through the rule fold
struct Fold {
    warnings: Vec<String>,
    current:  String
}

/// Syntax checker plus an immutable rule set.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent callers.
///
/// # Example
///
/// ```
/// use sql_optimizer::engine::Analyzer;
///
/// let analyzer = Analyzer::new();
/// let result = analyzer.analyze("SELECT * FROM users ORDER BY name");
///
/// assert!(result.errors.is_empty());
/// assert!(result.optimized_query.ends_with("LIMIT 100;"));
/// ```
#[derive(Default)]
pub struct Analyzer {
    checker: SyntaxChecker,
    rules:   RuleSet
}

impl Analyzer {
    /// Create an analyzer with every built-in rule
    pub fn new() -> Self {
        Self::with_rules(RuleSet::new())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            checker: SyntaxChecker::new(),
            rules
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Analyze a single statement
    pub fn analyze(&self, query: &str) -> AnalysisResult {
        let check = self.checker.check(query);
        if !check.ok {
            return AnalysisResult {
                errors:          vec![
                    check
                        .message
                        .unwrap_or_else(|| UNPARSEABLE_MESSAGE.to_string()),
                ],
                warnings:        Vec::new(),
                optimized_query: query.to_string()
            };
        }

        let initial = Fold {
            warnings: Vec::new(),
            current:  query.to_string()
        };
        let folded = self
            .rules
            .iter()
            .fold(initial, |acc, rule| apply_rule(acc, rule));

        AnalysisResult {
            errors:          Vec::new(),
            warnings:        folded.warnings,
            optimized_query: folded.current
        }
    }
}

/// One fold step. A failing rule leaves the accumulator unchanged.
fn apply_rule(mut acc: Fold, rule: &dyn Rule) -> Fold {
    match rule.apply(&acc.current) {
        Ok(Some(RuleOutcome {
            warning,
            rewrite
        })) => {
            let info = rule.info();
            tracing::debug!(rule = info.id, category = %info.category, "rule matched");
            acc.warnings.push(warning);
            if let Some(rewrite) = rewrite.filter(|r| !r.is_empty()) {
                acc.current = rewrite;
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(rule = rule.info().id, error = %e, "rule failed, skipping");
        }
    }
    acc
}
