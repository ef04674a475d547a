//! Syntax validation backed by `sqlparser`.
//!
//! The checker only answers whether a statement parses. It never returns an
//! error: every failure is folded into a [`SyntaxCheck`] with a message.

use serde::Serialize;
use sqlparser::{
    dialect::GenericDialect,
    parser::{Parser, ParserError}
};

use crate::error::format_sql_error;

/// Message used when non-blank text yields no statement at all
pub const UNPARSEABLE_MESSAGE: &str = "Unable to parse SQL query - check syntax";

/// Outcome of a syntax check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxCheck {
    pub ok:      bool,
    pub message: Option<String>
}

impl SyntaxCheck {
    fn passed() -> Self {
        Self {
            ok:      true,
            message: None
        }
    }

    fn failed(message: String) -> Self {
        Self {
            ok:      false,
            message: Some(message)
        }
    }
}

/// Validates statements with the generic SQL grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxChecker;

impl SyntaxChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check whether `sql` parses.
    ///
    /// Blank input passes; rejecting it is the caller's concern.
    pub fn check(&self, sql: &str) -> SyntaxCheck {
        if sql.trim().is_empty() {
            return SyntaxCheck::passed();
        }
        match Parser::parse_sql(&GenericDialect {}, sql) {
            Ok(statements) if statements.is_empty() => {
                SyntaxCheck::failed(UNPARSEABLE_MESSAGE.to_string())
            }
            Ok(_) => SyntaxCheck::passed(),
            Err(ParserError::ParserError(msg)) => {
                SyntaxCheck::failed(format_sql_error("SQL syntax error", &msg))
            }
            Err(other) => SyntaxCheck::failed(format_sql_error(
                "Unexpected parsing error",
                &other.to_string()
            ))
        }
    }
}
