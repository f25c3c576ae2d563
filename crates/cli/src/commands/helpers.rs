//! Shared helper functions and types for CLI commands.
//!
//! Result types here are what `--output json|yaml` serializes.

use anyhow::Result;
use fedsql_common::models::SchemaConfig;
use fedsql_core::FederationDescriptor;
use fedsql_error::{ErrorCode, ErrorContext, FedError};
use serde::Serialize;

/// Load a schema file, reporting failures as coded config errors.
pub fn load_schema(file_path: &str) -> Result<SchemaConfig> {
    let schema = SchemaConfig::from_file(file_path).map_err(|e| {
        FedError::new(ErrorCode::InvalidYaml, format!("{:#}", e))
            .with_context(ErrorContext::Config {
                file_path: Some(file_path.to_string()),
                line: None,
                field: None,
            })
            .with_hint("Check the schema file exists and matches the schema format")
    })?;
    tracing::info!(
        target: "federation",
        file = file_path,
        tables = schema.tables.len(),
        "Loaded schema"
    );
    Ok(schema)
}

/// Append `terminator` to every statement except batch separators.
pub fn terminate_statements(statements: Vec<String>, terminator: &str) -> Vec<String> {
    if terminator.is_empty() {
        return statements;
    }
    statements
        .into_iter()
        .map(|s| {
            if s == fedsql_core::ddl::BATCH_SEPARATOR {
                s
            } else {
                format!("{}{}", s, terminator)
            }
        })
        .collect()
}

#[derive(Serialize, Debug, Default)]
pub struct DdlResult {
    pub statements: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TableAssignment {
    pub table: String,
    pub federation: String,
}

#[derive(Serialize, Debug, Default)]
pub struct ValidateResult {
    pub valid: bool,
    pub federations: Vec<FederationDescriptor>,
    pub tables: Vec<TableAssignment>,
}
