//! fb-catalog CLI - Firebird system catalog tooling.

use clap::{Parser, Subcommand};
use fb_catalog::resolver::script::split_statements;
use fb_catalog::{decode, CatalogError, Config};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "fb-catalog")]
#[command(about = "Firebird system catalog introspection tools")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a catalog (type, subtype) code pair into a SQL type name
    DecodeType {
        /// Base type code (RDB$FIELD_TYPE)
        #[arg(allow_negative_numbers = true)]
        base: i16,

        /// Subtype code (RDB$FIELD_SUB_TYPE)
        #[arg(allow_negative_numbers = true, default_value = "0")]
        sub: i16,
    },

    /// Validate the configuration file and show the connection it describes
    CheckConfig,

    /// Show the statements a script would be split into
    SplitScript {
        /// Path to the SQL script
        script: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), CatalogError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(|e| CatalogError::Config(e.to_string()))?;

    match cli.command {
        Commands::DecodeType { base, sub } => {
            let sql_type = decode(base, sub);
            debug!("Decoded ({}, {}) as {}", base, sub, sql_type);

            if cli.output_json {
                let out = json!({ "base": base, "sub": sub, "sql_type": sql_type });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", sql_type);
            }
        }

        Commands::CheckConfig => {
            let config = Config::load(&cli.config)?;
            info!("Loaded configuration from {:?}", cli.config);

            let conn = &config.connection;
            let bytes_per_char = conn.bytes_per_char()?;

            if cli.output_json {
                let out = json!({
                    "valid": true,
                    "connection": conn.redacted_connection_string(),
                    "charset": conn.charset,
                    "bytes_per_char": bytes_per_char,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Configuration OK");
                println!("  Connection: {}", conn.redacted_connection_string());
                println!("  Charset: {} ({} bytes/char)", conn.charset, bytes_per_char);
                if let Some(role) = &conn.role {
                    println!("  Role: {}", role);
                }
            }
        }

        Commands::SplitScript { script } => {
            let content = std::fs::read_to_string(&script)?;
            let statements = split_statements(&content);
            info!("Split {:?} into {} statements", script, statements.len());

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&statements)?);
            } else {
                for (i, statement) in statements.iter().enumerate() {
                    println!("-- [{}]\n{};", i + 1, statement);
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries command output
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
