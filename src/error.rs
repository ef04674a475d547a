pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error raised by a single rule while inspecting a statement
pub fn rule_error(rule_id: &str, message: impl Into<String>) -> AppError {
    AppError::internal(format!("Rule {} failed: {}", rule_id, message.into()))
}

/// Create error for failures of the HTTP server itself
pub fn server_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Format a parser message with position highlighting when available
///
/// sqlparser reports positions as `... at Line: X, Column: Y`.
pub fn format_sql_error(prefix: &str, message: &str) -> String {
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}: {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}: {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let line_start = message.find(line_marker)? + line_marker.len();
    let rest = &message[line_start..];
    let line_end = rest.find(|c: char| !c.is_ascii_digit())?;
    let line = rest[..line_end].parse().ok()?;

    let rest = &rest[line_end..];
    let col_marker = "Column";
    let col_start = rest.find(col_marker)? + col_marker.len();
    let rest = rest[col_start..].trim_start_matches([':', ' ']);
    let col_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let column = rest[..col_end].parse().ok()?;

    Some(SqlPosition { line, column })
}
