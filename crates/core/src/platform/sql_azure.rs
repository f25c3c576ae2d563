use fedsql_common::models::{ColumnConfig, ColumnType, ForeignKeyConfig, TableConfig};
use serde_json::Value;

use super::Platform;

const DEFAULT_STRING_LENGTH: u32 = 255;
const DEFAULT_PRECISION: u8 = 10;

/// Words that must be bracket-quoted when used as identifiers.
const RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BY", "CASCADE", "CHECK", "COLUMN", "CONSTRAINT",
    "CREATE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "EXEC", "FEDERATION", "FILTERING",
    "FOREIGN", "FROM", "GO", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTO", "IS",
    "JOIN", "KEY", "LIKE", "NOT", "NULL", "OF", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES",
    "RESET", "SELECT", "SET", "TABLE", "TO", "UNION", "UNIQUE", "UPDATE", "USE", "USER", "VALUES",
    "VIEW", "WHERE", "WITH",
];

/// SQL Azure (SQL Server with federations) rendering.
///
/// Identifiers are emitted bare when they are plain words and bracketed
/// otherwise, so generated statements stay readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlAzurePlatform;

impl SqlAzurePlatform {
    pub fn new() -> Self {
        Self
    }

    fn needs_quoting(part: &str) -> bool {
        let mut chars = part.chars();
        let plain_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let plain_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        !(plain_start && plain_rest) || RESERVED.contains(&part.to_ascii_uppercase().as_str())
    }

    fn quote_part(part: &str) -> String {
        if Self::needs_quoting(part) {
            format!("[{}]", part.replace(']', "]]"))
        } else {
            part.to_string()
        }
    }

    fn column_declaration(&self, column: &ColumnConfig) -> String {
        let mut decl = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            self.render_column_type(column)
        );
        if column.autoincrement && column.column_type.is_integer() {
            decl.push_str(" IDENTITY");
        }
        if let Some(default) = column.default.as_ref() {
            decl.push_str(" DEFAULT ");
            decl.push_str(&render_default(column.column_type, default));
        }
        decl.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
        decl
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn render_default(column_type: ColumnType, value: &Value) -> String {
    match (column_type, value) {
        (_, Value::Null) => "NULL".to_string(),
        (ColumnType::Boolean, Value::Bool(b)) => (if *b { "1" } else { "0" }).to_string(),
        (t, Value::Number(n)) if t.is_numeric() || t == ColumnType::Boolean => n.to_string(),
        (t, Value::String(s)) if t.is_numeric() && s.parse::<f64>().is_ok() => s.clone(),
        (ColumnType::Date | ColumnType::DateTime | ColumnType::Time, Value::String(s))
            if s.eq_ignore_ascii_case("CURRENT_TIMESTAMP") =>
        {
            "CURRENT_TIMESTAMP".to_string()
        }
        (ColumnType::Guid, Value::String(s)) if s.eq_ignore_ascii_case("NEWID()") => {
            "NEWID()".to_string()
        }
        (_, Value::String(s)) => quote_literal(s),
        (_, other) => quote_literal(&other.to_string()),
    }
}

impl Platform for SqlAzurePlatform {
    fn quote_identifier(&self, name: &str) -> String {
        name.split('.')
            .map(Self::quote_part)
            .collect::<Vec<_>>()
            .join(".")
    }

    fn render_type(&self, column_type: ColumnType) -> String {
        match column_type {
            ColumnType::Guid => "UNIQUEIDENTIFIER".to_string(),
            ColumnType::SmallInt => "SMALLINT".to_string(),
            ColumnType::Integer => "INT".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Decimal => format!("NUMERIC({}, 0)", DEFAULT_PRECISION),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::Boolean => "BIT".to_string(),
            ColumnType::String => format!("NVARCHAR({})", DEFAULT_STRING_LENGTH),
            ColumnType::Text => "VARCHAR(MAX)".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::DateTime => "DATETIME2(6)".to_string(),
            ColumnType::Time => "TIME(0)".to_string(),
            ColumnType::Binary => format!("VARBINARY({})", DEFAULT_STRING_LENGTH),
            ColumnType::Blob => "VARBINARY(MAX)".to_string(),
        }
    }

    fn render_column_type(&self, column: &ColumnConfig) -> String {
        match column.column_type {
            ColumnType::String => {
                format!("NVARCHAR({})", column.length.unwrap_or(DEFAULT_STRING_LENGTH))
            }
            ColumnType::Binary => {
                format!("VARBINARY({})", column.length.unwrap_or(DEFAULT_STRING_LENGTH))
            }
            ColumnType::Decimal => format!(
                "NUMERIC({}, {})",
                column.precision.unwrap_or(DEFAULT_PRECISION),
                column.scale.unwrap_or(0)
            ),
            other => self.render_type(other),
        }
    }

    fn create_table_sql(&self, table: &TableConfig) -> Vec<String> {
        let mut elements: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column_declaration(c))
            .collect();
        if !table.primary_key.is_empty() {
            elements.push(format!("PRIMARY KEY ({})", self.quote_list(&table.primary_key)));
        }

        let table_name = self.quote_identifier(&table.name);
        let mut create = format!("CREATE TABLE {} ({})", table_name, elements.join(", "));

        let federation = &table.federation;
        if federation.is_federated() {
            if let (Some(distribution), Some(column)) =
                (&federation.distribution_name, &federation.column)
            {
                create.push_str(&format!(
                    " FEDERATED ON ({} = {})",
                    self.quote_identifier(distribution),
                    self.quote_identifier(column)
                ));
            }
        }

        let mut statements = vec![create];
        for index in &table.indexes {
            statements.push(format!(
                "CREATE {}INDEX {} ON {} ({})",
                if index.unique { "UNIQUE " } else { "" },
                self.quote_identifier(&index.name),
                table_name,
                self.quote_list(&index.columns)
            ));
        }
        statements
    }

    fn create_foreign_key_sql(
        &self,
        foreign_key: &ForeignKeyConfig,
        table: &TableConfig,
    ) -> Vec<String> {
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_identifier(&table.name),
            self.quote_identifier(&foreign_key.name),
            self.quote_list(&foreign_key.columns),
            self.quote_identifier(&foreign_key.foreign_table),
            self.quote_list(&foreign_key.foreign_columns)
        );
        if let Some(action) = foreign_key.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = foreign_key.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        vec![sql]
    }
}
