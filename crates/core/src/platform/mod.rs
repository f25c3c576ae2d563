//! SQL rendering collaborators.
//!
//! A [`Platform`] turns the neutral schema model into dialect SQL. The DDL
//! generator and the shard router only ever splice identifiers and types
//! through this trait.

pub mod sanitize;
mod sql_azure;

pub use sql_azure::SqlAzurePlatform;

use fedsql_common::models::{ColumnConfig, ColumnType, ForeignKeyConfig, TableConfig};

pub trait Platform {
    /// Quote an identifier for inclusion in a statement.
    fn quote_identifier(&self, name: &str) -> String;

    /// Declaration of a semantic type without per-column options.
    fn render_type(&self, column_type: ColumnType) -> String;

    /// Declaration of a column's type including length, precision and scale.
    fn render_column_type(&self, column: &ColumnConfig) -> String {
        self.render_type(column.column_type)
    }

    /// `CREATE TABLE` followed by the table's index statements.
    fn create_table_sql(&self, table: &TableConfig) -> Vec<String>;

    fn create_foreign_key_sql(
        &self,
        foreign_key: &ForeignKeyConfig,
        table: &TableConfig,
    ) -> Vec<String>;

    fn quote_list(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| self.quote_identifier(n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<P: Platform + ?Sized> Platform for &P {
    fn quote_identifier(&self, name: &str) -> String {
        (**self).quote_identifier(name)
    }

    fn render_type(&self, column_type: ColumnType) -> String {
        (**self).render_type(column_type)
    }

    fn render_column_type(&self, column: &ColumnConfig) -> String {
        (**self).render_column_type(column)
    }

    fn create_table_sql(&self, table: &TableConfig) -> Vec<String> {
        (**self).create_table_sql(table)
    }

    fn create_foreign_key_sql(
        &self,
        foreign_key: &ForeignKeyConfig,
        table: &TableConfig,
    ) -> Vec<String> {
        (**self).create_foreign_key_sql(foreign_key, table)
    }
}
