//! # SQL Optimizer
//!
//! Rule-based analysis and rewriting of single SQL statements.
//!
//! Every statement is first checked against the SQL grammar. Statements that
//! parse are then passed through seven textual rules, in a fixed order, each
//! of which may emit a warning and rewrite the statement for the rules after
//! it. The final text is returned as the optimized query.
//!
//! # Quick Start
//!
//! ```bash
//! # Start the HTTP server on 0.0.0.0:5001
//! sql-optimizer serve
//!
//! curl -s localhost:5001/analyze-query \
//!   -H 'content-type: application/json' \
//!   -d '{"query": "SELECT * FROM users ORDER BY name"}'
//!
//! # Analyze statements from files or stdin
//! echo "DELETE FROM users" | sql-optimizer analyze -
//! sql-optimizer analyze -f json q1.sql q2.sql
//!
//! # Utilities
//! echo "select id,name from users where id=1" | sql-optimizer format
//! echo "SELECT * FROM a JOIN b ON a.id = b.id" | sql-optimizer complexity
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`HOST`, `PORT`, `DEBUG`)
//! 3. `.sql-optimizer.toml` in current directory
//! 4. `~/.config/sql-optimizer/config.toml`
//!
//! # Exit Codes
//!
//! For `analyze`:
//!
//! - `0` - No issues
//! - `1` - Warnings found
//! - `2` - At least one statement failed the syntax check

use std::process;

use clap::Parser;
use tokio::main;
use tracing_subscriber::EnvFilter;

use sql_optimizer::{
    app,
    cli::{Cli, Commands},
    config::Config,
    error::AppResult,
    output::OutputOptions
};

#[main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the debug toggle
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            debug
        } => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            server_config.debug |= debug;
            init_tracing(server_config.debug);
            app::run_serve(server_config, &config).await?;
            Ok(0)
        }
        Commands::Analyze {
            files,
            output_format,
            no_color
        } => {
            init_tracing(config.server.debug);
            let opts = OutputOptions {
                format:  app::convert_format(output_format),
                colored: !no_color
            };
            let output = app::run_analyze(&files, &opts, &config)?;
            println!("{}", output.rendered);
            Ok(output.exit_code)
        }
        Commands::Format {
            file
        } => {
            init_tracing(config.server.debug);
            println!("{}", app::run_format(&file)?);
            Ok(0)
        }
        Commands::Complexity {
            file
        } => {
            init_tracing(config.server.debug);
            println!("{}", app::run_complexity(&file)?);
            Ok(0)
        }
    }
}
