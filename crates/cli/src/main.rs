//! fedsql CLI: federation DDL generation and schema checks.
//!
//! Reads a platform-neutral schema description (`schema.yaml`) whose tables
//! may be assigned to SQL Azure federations.
//!
//! # Commands
//!
//! - `ddl`: Print the `CREATE FEDERATION` and per-federation DDL script.
//! - `validate`: Resolve every table's federation without emitting DDL.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use owo_colors::OwoColorize;

mod commands;
mod config;
mod exit_codes;
mod output;

use fedsql_common::telemetry::init_logging;
use fedsql_error::{ErrorCategory, FedError};

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "fedsql")]
#[command(about = "Generate and check DDL for federated SQL Azure databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human, json, yaml)
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Path to the fedsql config file
    #[arg(long, global = true, env = "FEDSQL_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the federation DDL script for a schema
    Ddl {
        /// Path to the schema file
        #[arg(default_value = "schema.yaml")]
        file: String,
    },
    /// Check federation metadata of every table in a schema
    Validate {
        /// Path to the schema file
        #[arg(default_value = "schema.yaml")]
        file: String,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        let exit_code = map_error_to_exit_code(&e);
        if cli.output.is_machine_readable() {
            let coded = e.downcast_ref::<FedError>().cloned();
            output::print_error(cli.output, &e.to_string(), exit_code, ErrorData { error: coded })
                .ok();
        } else {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
        std::process::exit(exit_code);
    }
}

#[derive(serde::Serialize)]
struct ErrorData {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<FedError>,
}

fn map_error_to_exit_code(e: &anyhow::Error) -> i32 {
    if let Some(fed_err) = e.downcast_ref::<FedError>() {
        return match fed_err.category() {
            ErrorCategory::Connection => exit_codes::CONNECTION_ERROR,
            ErrorCategory::Config => exit_codes::CONFIG_ERROR,
            ErrorCategory::Routing => exit_codes::VALIDATION_ERROR,
            ErrorCategory::Internal => exit_codes::GENERAL_ERROR,
            _ => exit_codes::GENERAL_ERROR,
        };
    }

    // Fallback for errors raised before a coded error exists
    let s = e.to_string().to_lowercase();
    if s.contains("usage") || s.contains("argument") {
        return exit_codes::USAGE_ERROR;
    }
    if s.contains("config") || s.contains("yaml") {
        return exit_codes::CONFIG_ERROR;
    }
    exit_codes::GENERAL_ERROR
}

fn run_cli(cli: &Cli) -> Result<(), anyhow::Error> {
    let config = config::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match &cli.command {
        Commands::Ddl { file } => commands::ddl(file, cli.output, &config)?,
        Commands::Validate { file } => commands::validate(file, cli.output)?,
    }
    Ok(())
}
