use clap::Parser;
use sql_optimizer::cli::{Cli, Commands, Format};

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["sql-optimizer", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            debug, ..
        } => assert!(!debug),
        _ => panic!("expected serve")
    }
}

#[test]
fn test_parse_serve_overrides() {
    let cli = Cli::try_parse_from([
        "sql-optimizer",
        "serve",
        "--host",
        "127.0.0.1",
        "-p",
        "8080",
        "--debug"
    ])
    .unwrap();
    match cli.command {
        Commands::Serve {
            host,
            port,
            debug
        } => {
            assert_eq!(host.as_deref(), Some("127.0.0.1"));
            assert_eq!(port, Some(8080));
            assert!(debug);
        }
        _ => panic!("expected serve")
    }
}

#[test]
fn test_parse_analyze() {
    let cli =
        Cli::try_parse_from(["sql-optimizer", "analyze", "-f", "json", "--no-color", "a.sql", "b.sql"])
            .unwrap();
    match cli.command {
        Commands::Analyze {
            files,
            output_format,
            no_color
        } => {
            assert_eq!(files.len(), 2);
            assert!(matches!(output_format, Format::Json));
            assert!(no_color);
        }
        _ => panic!("expected analyze")
    }
}

#[test]
fn test_analyze_requires_input() {
    assert!(Cli::try_parse_from(["sql-optimizer", "analyze"]).is_err());
}

#[test]
fn test_format_defaults_to_stdin() {
    let cli = Cli::try_parse_from(["sql-optimizer", "format"]).unwrap();
    match cli.command {
        Commands::Format {
            file
        } => assert_eq!(file.to_str(), Some("-")),
        _ => panic!("expected format")
    }
}

#[test]
fn test_invalid_output_format() {
    assert!(Cli::try_parse_from(["sql-optimizer", "analyze", "-f", "xml", "a.sql"]).is_err());
}

#[test]
fn test_invalid_port() {
    assert!(Cli::try_parse_from(["sql-optimizer", "serve", "-p", "99999"]).is_err());
}
