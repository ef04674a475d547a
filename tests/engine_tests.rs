use std::{sync::Arc, thread};

use sql_optimizer::{
    config::RulesConfig,
    engine::{AnalysisResult, Analyzer},
    error::{AppResult, rule_error},
    rules::{Rule, RuleCategory, RuleInfo, RuleOutcome, RuleSet, style::TableAliases}
};

/// Rule that always replaces the statement with fixed text
struct ReplaceWith(&'static str);

impl Rule for ReplaceWith {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "TEST001",
            name:     "Replace with fixed text",
            category: RuleCategory::Style
        }
    }

    fn apply(&self, _sql: &str) -> AppResult<Option<RuleOutcome>> {
        Ok(Some(RuleOutcome::rewrite("replaced", self.0)))
    }
}

/// Rule that always fails
struct Broken;

impl Rule for Broken {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "TEST002",
            name:     "Always fails",
            category: RuleCategory::Performance
        }
    }

    fn apply(&self, _sql: &str) -> AppResult<Option<RuleOutcome>> {
        Err(rule_error("TEST002", "boom"))
    }
}

const THREE_TABLES: &str = "SELECT * FROM orders JOIN users ON orders.user_id = users.id \
                            JOIN products ON orders.product_id = products.id";

#[test]
fn test_invalid_statement_returned_untouched() {
    let sql = "SELECT id FROM users WHERE";
    let result = Analyzer::new().analyze(sql);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("SQL syntax error"));
    assert!(result.warnings.is_empty());
    assert_eq!(result.optimized_query, sql);
    assert!(!result.is_valid());
}

#[test]
fn test_select_star_rewritten() {
    let result = Analyzer::new().analyze("SELECT * FROM users WHERE id = 1");
    assert!(result.errors.is_empty());
    assert!(result.warnings[0].contains("SELECT *"));
    assert_eq!(
        result.optimized_query,
        "SELECT id, name, email, number FROM users WHERE id = 1"
    );
    assert!(!result.optimized_query.contains('*'));
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[1].contains("indexes"));
}

#[test]
fn test_delete_without_where_not_rewritten() {
    let result = Analyzer::new().analyze("DELETE FROM users");
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("WHERE"));
    assert_eq!(result.optimized_query, "DELETE FROM users");
}

#[test]
fn test_sequential_in_list_becomes_between() {
    let result = Analyzer::new()
        .analyze("SELECT * FROM users WHERE id IN (1,2,3,4,5,6,7,8,9,10,11,12,13,14,15)");
    assert!(result.errors.is_empty());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.contains("IN clause") && w.contains("BETWEEN"))
    );
    assert_eq!(
        result.optimized_query,
        "SELECT id, name, email, number FROM users WHERE id BETWEEN 1 AND 15"
    );
}

#[test]
fn test_order_by_gets_limit() {
    let result = Analyzer::new().analyze("SELECT * FROM users ORDER BY name");
    assert_eq!(
        result.optimized_query,
        "SELECT name, id, email, number FROM users ORDER BY name LIMIT 100;"
    );
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_distinct_dropped() {
    let result = Analyzer::new().analyze("SELECT DISTINCT u.name FROM users u WHERE u.id = 5");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.optimized_query, "SELECT u.name FROM users u WHERE u.id = 5");
}

#[test]
fn test_clean_statement() {
    let result = Analyzer::new().analyze("SELECT id FROM users");
    assert_eq!(
        result,
        AnalysisResult {
            errors:          vec![],
            warnings:        vec![],
            optimized_query: "SELECT id FROM users".to_string()
        }
    );
    assert!(!result.has_warnings());
}

#[test]
fn test_empty_input() {
    let result = Analyzer::new().analyze("");
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.optimized_query, "");
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = Analyzer::new();
    let sql = "SELECT * FROM orders WHERE id IN (1,3,5,7,9,11,13,15,17,19,21)";
    assert_eq!(analyzer.analyze(sql), analyzer.analyze(sql));
}

#[test]
fn test_rewrite_feeds_later_rules() {
    let sql = "SELECT id FROM users WHERE id IN (1,3,5,7,9,11,13,15,17,19,21)";

    let result = Analyzer::new().analyze(sql);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[1].contains("table aliases"));
    assert!(
        result
            .optimized_query
            .contains("FROM users AS d AS c AS b AS a\n")
    );
    assert!(result.optimized_query.contains("TABLE temp_ids AS e"));

    let config = RulesConfig {
        disabled: vec!["PERF001".to_string()]
    };
    let result = Analyzer::with_rules(RuleSet::with_config(&config)).analyze(sql);
    assert!(result.warnings.is_empty());
    assert_eq!(result.optimized_query, sql);
}

#[test]
fn test_rule_order_changes_result() {
    let replace_first = Analyzer::with_rules(RuleSet::from_rules(vec![
        Box::new(ReplaceWith(THREE_TABLES)),
        Box::new(TableAliases),
    ]));
    let result = replace_first.analyze("SELECT id FROM users");
    assert_eq!(result.warnings.len(), 2);
    assert!(result.optimized_query.contains("orders AS a"));

    let aliases_first = Analyzer::with_rules(RuleSet::from_rules(vec![
        Box::new(TableAliases),
        Box::new(ReplaceWith(THREE_TABLES)),
    ]));
    let result = aliases_first.analyze("SELECT id FROM users");
    assert_eq!(result.warnings, vec!["replaced"]);
    assert_eq!(result.optimized_query, THREE_TABLES);
}

#[test]
fn test_failing_rule_is_skipped() {
    let analyzer = Analyzer::with_rules(RuleSet::from_rules(vec![
        Box::new(Broken),
        Box::new(ReplaceWith("SELECT 1")),
    ]));
    let result = analyzer.analyze("SELECT id FROM users");
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings, vec!["replaced"]);
    assert_eq!(result.optimized_query, "SELECT 1");
}

#[test]
fn test_empty_rewrite_ignored() {
    let analyzer = Analyzer::with_rules(RuleSet::from_rules(vec![Box::new(ReplaceWith(""))]));
    let result = analyzer.analyze("SELECT id FROM users");
    assert_eq!(result.warnings, vec!["replaced"]);
    assert_eq!(result.optimized_query, "SELECT id FROM users");
}

#[test]
fn test_shared_analyzer_across_threads() {
    let analyzer = Arc::new(Analyzer::new());
    let expected = analyzer.analyze("SELECT * FROM users ORDER BY name");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze("SELECT * FROM users ORDER BY name"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_result_serializes_expected_keys() {
    let result = Analyzer::new().analyze("DELETE FROM users");
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["errors"].as_array().unwrap().is_empty());
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(json["optimized_query"], "DELETE FROM users");
}
