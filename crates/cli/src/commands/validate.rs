//! `fedsql validate`: check federation metadata without emitting DDL.
//!
//! Every table is resolved to its federation exactly as `ddl` would, so a
//! schema that validates also generates.

use super::helpers::{load_schema, TableAssignment, ValidateResult};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use fedsql_core::ddl::ROOT_FEDERATION;
use fedsql_core::{FederationDdl, ShardingError, SqlAzurePlatform};
use owo_colors::OwoColorize;

pub fn validate(file_path: &str, format: OutputFormat) -> Result<()> {
    if format.is_machine_readable() {
        let result = validate_internal(file_path)?;
        return output::print_success(format, &result);
    }

    println!(
        "{} {} {}",
        "[Schema:".dimmed(),
        file_path.yellow(),
        "] Validating...".bold().cyan()
    );
    let result = validate_internal(file_path)?;

    for federation in &result.federations {
        println!(
            "{} federation {} ({} {})",
            "✔".green(),
            federation.name.bold(),
            federation.distribution_name,
            federation.column_type
        );
    }
    for assignment in &result.tables {
        let federation = if assignment.federation == ROOT_FEDERATION {
            "root".dimmed().to_string()
        } else {
            assignment.federation.clone()
        };
        println!("  {} {} {}", assignment.table, "→".dimmed(), federation);
    }
    println!("{}", "Schema is valid.".green().bold());
    Ok(())
}

pub(crate) fn validate_internal(file_path: &str) -> Result<ValidateResult> {
    let schema = load_schema(file_path)?;
    let mut ddl = FederationDdl::new(SqlAzurePlatform::new());

    let mut tables = Vec::with_capacity(schema.tables.len());
    for table in &schema.tables {
        ddl.accept_table(table).map_err(ShardingError::to_fed_error)?;
        for foreign_key in &table.foreign_keys {
            ddl.accept_foreign_key(table, foreign_key)
                .map_err(ShardingError::to_fed_error)?;
        }
        tables.push(TableAssignment {
            table: table.name.clone(),
            federation: ddl
                .federation_of(&table.name)
                .unwrap_or(ROOT_FEDERATION)
                .to_string(),
        });
    }

    Ok(ValidateResult {
        valid: true,
        federations: ddl.federations().to_vec(),
        tables,
    })
}
