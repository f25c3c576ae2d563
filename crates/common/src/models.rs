//! Platform-neutral schema description.
//!
//! Tables may carry federation options; a table without a federation name
//! lives in the root federation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct SchemaConfig {
    #[serde(default)]
    #[validate(nested)]
    pub tables: Vec<TableConfig>,
}

impl SchemaConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let schema: SchemaConfig =
            serde_yaml::from_str(content).context("Failed to parse schema YAML")?;
        schema
            .validate()
            .map_err(|e| anyhow::anyhow!("Schema validation failed: {:?}", e))?;
        Ok(schema)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read schema file at {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct TableConfig {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub columns: Vec<ColumnConfig>,

    #[serde(default)]
    pub primary_key: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub indexes: Vec<IndexConfig>,

    #[serde(default)]
    #[validate(nested)]
    pub foreign_keys: Vec<ForeignKeyConfig>,

    #[serde(default)]
    pub federation: FederationOptions,
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            federation: FederationOptions::default(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn with_column(mut self, column: ColumnConfig) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKeyConfig) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn federated(
        mut self,
        federation: &str,
        distribution_name: &str,
        column: &str,
    ) -> Self {
        self.federation = FederationOptions {
            name: Some(federation.to_string()),
            distribution_name: Some(distribution_name.to_string()),
            column: Some(column.to_string()),
        };
        self
    }
}

/// Federation membership of a table.
///
/// `distribution_name` names the federation's distribution; `column` is the
/// table column holding the distribution value.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FederationOptions {
    #[serde(default, alias = "federation_name")]
    pub name: Option<String>,
    #[serde(default, alias = "federated_on_distribution_name")]
    pub distribution_name: Option<String>,
    #[serde(default, alias = "federated_on_column_name")]
    pub column: Option<String>,
}

impl FederationOptions {
    pub fn is_federated(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ColumnConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub length: Option<u32>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub autoincrement: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            length: None,
            precision: None,
            scale: None,
            nullable: false,
            autoincrement: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Semantic column types, rendered to SQL by a platform.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Guid,
    #[serde(rename = "smallint")]
    SmallInt,
    Integer,
    #[serde(rename = "bigint")]
    BigInt,
    Decimal,
    Float,
    Boolean,
    String,
    Text,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Time,
    Binary,
    Blob,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Guid => "guid",
            ColumnType::SmallInt => "smallint",
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Time => "time",
            ColumnType::Binary => "binary",
            ColumnType::Blob => "blob",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::SmallInt | ColumnType::Integer | ColumnType::BigInt
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, ColumnType::Decimal | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct IndexConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ForeignKeyConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub columns: Vec<String>,
    #[validate(length(min = 1))]
    pub foreign_table: String,
    #[validate(length(min = 1))]
    pub foreign_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<ReferentialAction>,
    #[serde(default)]
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKeyConfig {
    pub fn new(
        name: impl Into<String>,
        columns: &[&str],
        foreign_table: impl Into<String>,
        foreign_columns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            foreign_table: foreign_table.into(),
            foreign_columns: foreign_columns.iter().map(|c| c.to_string()).collect(),
            on_delete: None,
            on_update: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

impl ReferentialAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::NoAction => "NO ACTION",
        }
    }
}
