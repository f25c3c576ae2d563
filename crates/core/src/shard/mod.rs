//! Shard routing: pick which federation member a connection talks to.

mod config;
mod sql_azure;

pub use config::{
    ShardingConfig, DISTRIBUTION_KEY_PARAM, FEDERATION_NAME_PARAM, FILTERING_ENABLED_PARAM,
};
pub use sql_azure::{SqlAzureShardManager, PARTITION_CATALOG_SQL, SELECT_ROOT_SQL};

use crate::connection::{DatabaseError, Row};
use crate::error::Result;
use crate::value::{DistributionValue, SqlValue};

/// One federation member as reported by the partition catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Shard {
    pub id: SqlValue,
    pub distribution_key: String,
    pub range_low: SqlValue,
    pub range_high: SqlValue,
}

impl Shard {
    pub fn from_row(row: &Row) -> std::result::Result<Self, DatabaseError> {
        let column = |name: &str| {
            row.get(name).cloned().ok_or_else(|| {
                DatabaseError::new(format!("Partition catalog row is missing '{}'", name))
            })
        };
        Ok(Self {
            id: column("id")?,
            distribution_key: column("distribution_key")?.to_string(),
            range_low: column("range_low")?,
            range_high: column("range_high")?,
        })
    }
}

/// Per-call overrides for [`SqlAzureShardManager::select_shard_with`].
///
/// Unset fields fall back to the manager's [`ShardingConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    pub federation_name: Option<String>,
    pub distribution_key: Option<String>,
    pub filtering_enabled: Option<bool>,
}

impl SelectOptions {
    pub fn federation(mut self, name: impl Into<String>) -> Self {
        self.federation_name = Some(name.into());
        self
    }

    pub fn distribution_key(mut self, key: impl Into<String>) -> Self {
        self.distribution_key = Some(key.into());
        self
    }

    pub fn filtering(mut self, enabled: bool) -> Self {
        self.filtering_enabled = Some(enabled);
        self
    }
}

/// Switches a connection between the root and federation members.
///
/// Switching is refused while a transaction is open on the connection.
pub trait ShardManager {
    /// Route subsequent statements to the root federation.
    fn select_global(&mut self) -> Result<()>;

    /// Route subsequent statements to the member owning `value`.
    fn select_shard(&mut self, value: SqlValue) -> Result<()>;

    /// Switch to several members at once. Not supported by SQL Azure.
    fn select_shards(&mut self, values: &[SqlValue]) -> Result<()>;

    /// `None` while routed to the root.
    fn current_distribution_value(&self) -> Option<&DistributionValue>;

    fn get_shards(&mut self) -> Result<Vec<Shard>>;

    /// Run a read on every member and concatenate the rows.
    fn query_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>>;
}
