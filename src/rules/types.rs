//! Type definitions for the rule system.
//!
//! - [`RuleCategory`] - Rule categories (Performance, Style, Security)
//! - [`RuleInfo`] - Static rule metadata
//! - [`RuleOutcome`] - Warning and optional rewrite produced by a matching rule

use serde::Serialize;

/// Category of a rule for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    /// Rules that detect potential performance issues
    Performance,
    /// Rules that enforce coding style and best practices
    Style,
    /// Rules that identify potentially dangerous statements
    Security
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Performance => write!(f, "Performance"),
            Self::Style => write!(f, "Style"),
            Self::Security => write!(f, "Security")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "PERF001")
    pub id:       &'static str,
    /// Human-readable rule name
    pub name:     &'static str,
    /// Rule category
    pub category: RuleCategory
}

/// Result of a rule that matched a statement.
///
/// The warning is always present. A rewrite, when present, replaces the
/// statement text seen by every following rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub warning: String,
    pub rewrite: Option<String>
}

impl RuleOutcome {
    /// Outcome carrying only a warning
    pub fn warn(warning: impl Into<String>) -> Self {
        Self {
            warning: warning.into(),
            rewrite: None
        }
    }

    /// Outcome carrying a warning and a rewritten statement
    pub fn rewrite(warning: impl Into<String>, rewrite: impl Into<String>) -> Self {
        Self {
            warning: warning.into(),
            rewrite: Some(rewrite.into())
        }
    }
}
