//! Structural complexity of a statement.
//!
//! Parses with `sqlparser` and walks the tree counting table references,
//! joins, WHERE clauses and subqueries. Counts include everything nested
//! inside subqueries and CTEs.

mod extract;

use extract::count_statement;
use serde::Serialize;
use sqlparser::{dialect::GenericDialect, parser::Parser};

/// Diagnostic returned when the statement cannot be parsed
pub const COMPLEXITY_ERROR: &str = "Unable to analyze query complexity";

/// Query complexity metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryComplexity {
    /// Table references, repeats included
    pub tables:     u32,
    pub joins:      u32,
    /// Number of WHERE clauses
    pub conditions: u32,
    /// Derived tables, scalar subqueries, `IN (SELECT ...)` and `EXISTS`
    pub subqueries: u32
}

/// Complexity metrics, or a single diagnostic when parsing failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ComplexityReport {
    Metrics(QueryComplexity),
    Failed { error: String }
}

impl ComplexityReport {
    pub fn metrics(&self) -> Option<&QueryComplexity> {
        match self {
            Self::Metrics(m) => Some(m),
            Self::Failed {
                ..
            } => None
        }
    }
}

/// Compute complexity metrics for every statement in `sql`
///
/// # Example
///
/// ```
/// use sql_optimizer::query::query_complexity;
///
/// let report = query_complexity("SELECT * FROM users u JOIN orders o ON u.id = o.user_id");
/// let metrics = report.metrics().unwrap();
///
/// assert_eq!(metrics.tables, 2);
/// assert_eq!(metrics.joins, 1);
/// ```
pub fn query_complexity(sql: &str) -> ComplexityReport {
    match Parser::parse_sql(&GenericDialect {}, sql) {
        Ok(statements) => {
            let mut complexity = QueryComplexity::default();
            for stmt in &statements {
                count_statement(stmt, &mut complexity);
            }
            ComplexityReport::Metrics(complexity)
        }
        Err(e) => {
            tracing::debug!(error = %e, "complexity analysis failed");
            ComplexityReport::Failed {
                error: COMPLEXITY_ERROR.to_string()
            }
        }
    }
}
