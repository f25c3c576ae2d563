//! `fedsql ddl`: print the federation DDL script for a schema.

use super::helpers::{load_schema, terminate_statements, DdlResult};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use fedsql_common::config::AppConfig;
use fedsql_core::{generate, ShardingError, SqlAzurePlatform};

pub fn ddl(file_path: &str, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let result = ddl_internal(file_path, config)?;

    if format.is_machine_readable() {
        return output::print_success(format, &result);
    }
    for statement in &result.statements {
        println!("{}", statement);
    }
    Ok(())
}

pub(crate) fn ddl_internal(file_path: &str, config: &AppConfig) -> Result<DdlResult> {
    let schema = load_schema(file_path)?;
    let statements =
        generate(&schema, SqlAzurePlatform::new()).map_err(ShardingError::to_fed_error)?;

    Ok(DdlResult {
        statements: terminate_statements(statements, &config.ddl.statement_terminator),
    })
}
