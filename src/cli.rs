use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Optimizer - Detect bad practices in SQL statements and suggest rewrites
#[derive(Parser, Debug)]
#[command(name = "sql-optimizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Bind port
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long)]
        debug: bool
    },

    /// Analyze SQL statements, one per file
    Analyze {
        /// Files holding one statement each (use - for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Reformat a statement for display
    Format {
        /// File holding the statement (use - for stdin)
        #[arg(default_value = "-")]
        file: PathBuf
    },

    /// Report structural complexity of a statement
    Complexity {
        /// File holding the statement (use - for stdin)
        #[arg(default_value = "-")]
        file: PathBuf
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
