use std::collections::HashMap;

use fedsql_common::models::{ColumnType, ForeignKeyConfig, SchemaConfig, TableConfig};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, ShardingError};
use crate::platform::sanitize::validate_identifier;
use crate::platform::Platform;

/// Bucket name for tables that are not part of any federation.
pub const ROOT_FEDERATION: &str = "_root";
pub const BATCH_SEPARATOR: &str = "GO";
pub const NIL_GUID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FederationDescriptor {
    pub name: String,
    pub distribution_name: String,
    pub column_type: ColumnType,
}

/// Literal used as the distribution value when switching into a federation
/// to create objects in it.
pub fn placeholder_value(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Guid => NIL_GUID,
        t if t.is_integer() => "0",
        _ => "",
    }
}

#[derive(Debug)]
struct Bucket {
    federation: String,
    switch_sql: String,
    tables: Vec<String>,
    foreign_keys: Vec<String>,
}

impl Bucket {
    fn new(federation: impl Into<String>, switch_sql: String) -> Self {
        Self {
            federation: federation.into(),
            switch_sql,
            tables: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }
}

/// Accumulates table and foreign-key DDL per federation.
///
/// Buckets keep discovery order with the root bucket first. The first table
/// naming a federation fixes its descriptor; later declarations never change
/// it.
#[derive(Debug)]
pub struct FederationDdl<P: Platform> {
    platform: P,
    federations: Vec<FederationDescriptor>,
    buckets: Vec<Bucket>,
    assignments: HashMap<String, String>,
}

impl<P: Platform> FederationDdl<P> {
    pub fn new(platform: P) -> Self {
        let mut ddl = Self {
            platform,
            federations: Vec::new(),
            buckets: Vec::new(),
            assignments: HashMap::new(),
        };
        ddl.reset();
        ddl
    }

    /// Drop all accumulated state so the builder can process another schema.
    pub fn reset(&mut self) {
        self.federations.clear();
        self.assignments.clear();
        self.buckets = vec![Bucket::new(
            ROOT_FEDERATION,
            "USE FEDERATION ROOT WITH RESET".to_string(),
        )];
    }

    pub fn federations(&self) -> &[FederationDescriptor] {
        &self.federations
    }

    /// Federation the table was assigned to, once it has been seen.
    pub fn federation_of(&self, table: &str) -> Option<&str> {
        self.assignments.get(table).map(String::as_str)
    }

    pub fn accept_table(&mut self, table: &TableConfig) -> Result<()> {
        let federation = self.assign(table)?;
        let statements = self.platform.create_table_sql(table);
        self.bucket_mut(&federation).tables.extend(statements);
        Ok(())
    }

    /// Foreign keys land in the bucket of the referencing table.
    pub fn accept_foreign_key(
        &mut self,
        table: &TableConfig,
        foreign_key: &ForeignKeyConfig,
    ) -> Result<()> {
        let federation = self.assign(table)?;
        let statements = self.platform.create_foreign_key_sql(foreign_key, table);
        self.bucket_mut(&federation).foreign_keys.extend(statements);
        Ok(())
    }

    pub fn queries(&self) -> Vec<String> {
        let mut sql: Vec<String> = self
            .federations
            .iter()
            .map(|f| {
                format!(
                    "CREATE FEDERATION {} ({} {})",
                    self.platform.quote_identifier(&f.name),
                    self.platform.quote_identifier(&f.distribution_name),
                    self.platform.render_type(f.column_type)
                )
            })
            .collect();

        for bucket in &self.buckets {
            push_batch(&mut sql, &bucket.switch_sql, &bucket.tables);
        }
        for bucket in &self.buckets {
            push_batch(&mut sql, &bucket.switch_sql, &bucket.foreign_keys);
        }
        sql
    }

    fn assign(&mut self, table: &TableConfig) -> Result<String> {
        if let Some(federation) = self.assignments.get(&table.name) {
            return Ok(federation.clone());
        }
        let federation = self.resolve(table)?;
        self.assignments
            .insert(table.name.clone(), federation.clone());
        Ok(federation)
    }

    fn resolve(&mut self, table: &TableConfig) -> Result<String> {
        let options = &table.federation;
        let Some(name) = options.name.as_deref().filter(|n| !n.is_empty()) else {
            return Ok(ROOT_FEDERATION.to_string());
        };

        let missing = |option: &'static str| ShardingError::MissingFederationMetadata {
            table: table.name.clone(),
            federation: name.to_string(),
            option,
        };
        let distribution_name = options
            .distribution_name
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| missing("federated_on_distribution_name"))?;
        let column_name = options
            .column
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| missing("federated_on_column_name"))?;

        if name == ROOT_FEDERATION {
            return Ok(ROOT_FEDERATION.to_string());
        }
        validate_identifier(name)?;
        validate_identifier(distribution_name)?;

        let column = table
            .column(column_name)
            .ok_or_else(|| ShardingError::UnknownColumn {
                table: table.name.clone(),
                federation: name.to_string(),
                column: column_name.to_string(),
            })?;

        match self.federations.iter().find(|f| f.name == name) {
            Some(existing) => {
                if existing.distribution_name != distribution_name
                    || existing.column_type != column.column_type
                {
                    warn!(
                        target: "federation",
                        federation = name,
                        table = %table.name,
                        declared = %format!("{} {}", distribution_name, column.column_type),
                        kept = %format!("{} {}", existing.distribution_name, existing.column_type),
                        "Conflicting federation declaration ignored"
                    );
                }
            }
            None => {
                let descriptor = FederationDescriptor {
                    name: name.to_string(),
                    distribution_name: distribution_name.to_string(),
                    column_type: column.column_type,
                };
                debug!(
                    target: "federation",
                    federation = name,
                    distribution = distribution_name,
                    column_type = %descriptor.column_type,
                    "Discovered federation"
                );
                let switch_sql = format!(
                    "USE FEDERATION {} ({} = '{}') WITH RESET, FILTERING=OFF",
                    self.platform.quote_identifier(name),
                    self.platform.quote_identifier(distribution_name),
                    placeholder_value(descriptor.column_type)
                );
                self.buckets.push(Bucket::new(name, switch_sql));
                self.federations.push(descriptor);
            }
        }
        Ok(name.to_string())
    }

    fn bucket_mut(&mut self, federation: &str) -> &mut Bucket {
        let index = self
            .buckets
            .iter()
            .position(|b| b.federation == federation)
            .unwrap_or(0);
        &mut self.buckets[index]
    }
}

fn push_batch(sql: &mut Vec<String>, switch_sql: &str, statements: &[String]) {
    if statements.is_empty() {
        return;
    }
    sql.push(BATCH_SEPARATOR.to_string());
    sql.push(switch_sql.to_string());
    sql.push(BATCH_SEPARATOR.to_string());
    sql.extend(statements.iter().cloned());
}

/// Generate the full federation DDL for a schema.
///
/// Either every statement is returned or the first metadata error is; no
/// partial output escapes.
pub fn generate<P: Platform>(schema: &SchemaConfig, platform: P) -> Result<Vec<String>> {
    let mut ddl = FederationDdl::new(platform);
    for table in &schema.tables {
        ddl.accept_table(table)?;
        for foreign_key in &table.foreign_keys {
            ddl.accept_foreign_key(table, foreign_key)?;
        }
    }
    let queries = ddl.queries();
    debug!(
        target: "federation",
        federations = ddl.federations().len(),
        statements = queries.len(),
        "Generated federation DDL"
    );
    Ok(queries)
}
