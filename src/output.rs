//! Rendering of analysis results for the command line.

use colored::Colorize;
use serde::Serialize;

use crate::engine::AnalysisResult;

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// One analyzed input, labelled with where it came from
#[derive(Debug, Clone, Serialize)]
pub struct LabelledResult {
    pub source: String,
    #[serde(flatten)]
    pub result: AnalysisResult
}

/// Format analysis results based on output options
pub fn format_results(results: &[LabelledResult], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(results).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(results).unwrap_or_default(),
        OutputFormat::Text => results
            .iter()
            .map(|r| format_text_result(r, opts.colored))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_text_result(labelled: &LabelledResult, colored: bool) -> String {
    let result = &labelled.result;
    let mut output = String::new();

    let header = format!("=== {} ===", labelled.source);
    if colored {
        output.push_str(&header.cyan().bold().to_string());
    } else {
        output.push_str(&header);
    }
    output.push('\n');

    for error in &result.errors {
        let label = if colored {
            "ERROR".red().bold().to_string()
        } else {
            "ERROR".to_string()
        };
        output.push_str(&format!("[{}] {}\n", label, error));
    }
    for warning in &result.warnings {
        let label = if colored {
            "WARN".yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        output.push_str(&format!("[{}] {}\n", label, warning));
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        if colored {
            output.push_str(&"No issues found".green().to_string());
        } else {
            output.push_str("No issues found");
        }
        output.push('\n');
    }

    if result.is_valid() {
        output.push_str("\nOptimized query:\n");
        output.push_str(&result.optimized_query);
        output.push('\n');
    }

    output
}
