//! Application logic for the command line.
//!
//! Kept apart from the binary entry point so every command can be tested
//! without spawning a process.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use rayon::prelude::*;

use crate::{
    cli::Format,
    config::{Config, ServerConfig},
    engine::{AnalysisResult, Analyzer},
    error::{AppResult, file_read_error},
    format::format_query,
    output::{LabelledResult, OutputFormat, OutputOptions, format_results},
    query::query_complexity,
    rules::RuleSet,
    server
};

/// Outcome of the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeOutput {
    /// Process exit code (0=clean, 1=warnings, 2=syntax errors)
    pub exit_code: i32,
    pub rendered:  String
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Calculate exit code from analysis results
///
/// - `0` - every statement parsed and no rule matched
/// - `1` - at least one warning
/// - `2` - at least one statement failed the syntax check
pub fn calculate_exit_code(results: &[AnalysisResult]) -> i32 {
    if results.iter().any(|r| !r.is_valid()) {
        2
    } else if results.iter().any(AnalysisResult::has_warnings) {
        1
    } else {
        0
    }
}

/// Read a statement from file or stdin ("-")
pub fn read_input(path: &Path) -> AppResult<String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

/// Analyze each input independently, in parallel, keeping input order
pub fn analyze_inputs(analyzer: &Analyzer, inputs: &[(String, String)]) -> Vec<LabelledResult> {
    inputs
        .par_iter()
        .map(|(source, sql)| LabelledResult {
            source: source.clone(),
            result: analyzer.analyze(sql.trim())
        })
        .collect()
}

/// Run the analyze command
pub fn run_analyze(
    files: &[impl AsRef<Path>],
    opts: &OutputOptions,
    config: &Config
) -> AppResult<AnalyzeOutput> {
    let inputs = files
        .iter()
        .map(|f| {
            let path = f.as_ref();
            let label = if path.to_str() == Some("-") {
                "stdin".to_string()
            } else {
                path.display().to_string()
            };
            read_input(path).map(|sql| (label, sql))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let analyzer = Analyzer::with_rules(RuleSet::with_config(&config.rules));
    tracing::debug!(
        inputs = inputs.len(),
        rules = ?analyzer.rules().ids(),
        "analyzing statements"
    );
    let results = analyze_inputs(&analyzer, &inputs);
    let plain: Vec<AnalysisResult> = results.iter().map(|r| r.result.clone()).collect();

    Ok(AnalyzeOutput {
        exit_code: calculate_exit_code(&plain),
        rendered:  format_results(&results, opts)
    })
}

/// Run the format command
pub fn run_format(file: &Path) -> AppResult<String> {
    let sql = read_input(file)?;
    Ok(format_query(sql.trim()))
}

/// Run the complexity command, rendered as pretty JSON
pub fn run_complexity(file: &Path) -> AppResult<String> {
    let sql = read_input(file)?;
    let report = query_complexity(sql.trim());
    Ok(serde_json::to_string_pretty(&report).unwrap_or_default())
}

/// Run the HTTP server until interrupted
pub async fn run_serve(server_config: ServerConfig, config: &Config) -> AppResult<()> {
    let analyzer = Analyzer::with_rules(RuleSet::with_config(&config.rules));
    tracing::info!(rules = ?analyzer.rules().ids(), "rule set ready");
    server::serve(&server_config, analyzer).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(errors: &[&str], warnings: &[&str]) -> AnalysisResult {
        AnalysisResult {
            errors:          errors.iter().map(|s| s.to_string()).collect(),
            warnings:        warnings.iter().map(|s| s.to_string()).collect(),
            optimized_query: String::new()
        }
    }

    #[test]
    fn test_convert_format() {
        assert_eq!(convert_format(Format::Text), OutputFormat::Text);
        assert_eq!(convert_format(Format::Json), OutputFormat::Json);
        assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
    }

    #[test]
    fn test_calculate_exit_code_clean() {
        assert_eq!(calculate_exit_code(&[result(&[], &[])]), 0);
        assert_eq!(calculate_exit_code(&[]), 0);
    }

    #[test]
    fn test_calculate_exit_code_warnings() {
        assert_eq!(
            calculate_exit_code(&[result(&[], &[]), result(&[], &["w"])]),
            1
        );
    }

    #[test]
    fn test_calculate_exit_code_errors_win() {
        assert_eq!(
            calculate_exit_code(&[result(&[], &["w"]), result(&["e"], &[])]),
            2
        );
    }

    #[test]
    fn test_analyze_inputs_keeps_order() {
        let analyzer = Analyzer::new();
        let inputs: Vec<(String, String)> = (0..16)
            .map(|i| (format!("q{}", i), format!("SELECT id FROM t{} ", i)))
            .collect();
        let results = analyze_inputs(&analyzer, &inputs);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.source, format!("q{}", i));
            assert_eq!(r.result.optimized_query, format!("SELECT id FROM t{}", i));
        }
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(Path::new("/nonexistent/query.sql")).is_err());
    }
}
