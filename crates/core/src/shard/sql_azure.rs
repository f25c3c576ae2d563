use tracing::{debug, warn};

use super::{SelectOptions, Shard, ShardManager, ShardingConfig};
use crate::connection::{Connection, Row};
use crate::error::{Result, ShardingError};
use crate::platform::sanitize::validate_identifier;
use crate::platform::{Platform, SqlAzurePlatform};
use crate::value::{DistributionValue, SqlValue};

pub const SELECT_ROOT_SQL: &str = "USE FEDERATION ROOT WITH RESET";

pub const PARTITION_CATALOG_SQL: &str = "SELECT member_id AS id, distribution_name AS distribution_key, CAST(range_low AS CHAR) AS range_low, CAST(range_high AS CHAR) AS range_high FROM sys.federation_member_distributions d INNER JOIN sys.federations f ON f.federation_id = d.federation_id WHERE f.name = ?";

/// Shard manager for SQL Azure federations.
///
/// Owns the connection it routes; every switch is a `USE FEDERATION`
/// statement executed on that connection. The tracked selection only
/// changes after the switch statement succeeded.
#[derive(Debug)]
pub struct SqlAzureShardManager<C: Connection, P: Platform = SqlAzurePlatform> {
    conn: C,
    platform: P,
    config: ShardingConfig,
    current: Option<Selection>,
}

/// The member the connection is routed to, with the federation, key and
/// filtering that were in effect for the switch.
#[derive(Debug, Clone)]
struct Selection {
    value: DistributionValue,
    federation: String,
    distribution_key: String,
    filtering: bool,
}

impl Selection {
    fn options(&self) -> SelectOptions {
        SelectOptions::default()
            .federation(self.federation.clone())
            .distribution_key(self.distribution_key.clone())
            .filtering(self.filtering)
    }
}

impl<C: Connection> SqlAzureShardManager<C> {
    pub fn new(conn: C) -> Result<Self> {
        Self::with_platform(conn, SqlAzurePlatform::new())
    }
}

impl<C: Connection, P: Platform> SqlAzureShardManager<C, P> {
    /// Build a manager from the connection's `federationName`,
    /// `distributionKey` and `filteringEnabled` parameters.
    pub fn with_platform(conn: C, platform: P) -> Result<Self> {
        let config = ShardingConfig::from_params(conn.params())?;
        debug!(
            target: "sharding",
            federation = %config.federation_name,
            distribution_key = %config.distribution_key,
            filtering = config.filtering_enabled,
            "Shard manager configured"
        );
        Ok(Self {
            conn,
            platform,
            config,
            current: None,
        })
    }

    pub fn config(&self) -> &ShardingConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Federation of the member currently selected, `None` at the root.
    pub fn current_federation(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.federation.as_str())
    }

    /// Like [`ShardManager::select_shard`], overriding the configured
    /// federation, distribution key or filtering for this switch only.
    pub fn select_shard_with(&mut self, value: SqlValue, options: &SelectOptions) -> Result<()> {
        self.ensure_no_transaction()?;
        let value = DistributionValue::try_from(value)?;
        let selection = self.resolve(value, options)?;
        let sql = self.switch_sql(&selection);

        debug!(target: "sharding", value = %selection.value, sql = %sql, "Switching to federation member");
        self.conn.execute(&sql, &[selection.value.clone().into()])?;
        self.current = Some(selection);
        Ok(())
    }

    fn ensure_no_transaction(&self) -> Result<()> {
        if self.conn.is_transaction_active() {
            return Err(ShardingError::TransactionActive);
        }
        Ok(())
    }

    fn resolve(&self, value: DistributionValue, options: &SelectOptions) -> Result<Selection> {
        let federation = options
            .federation_name
            .as_deref()
            .unwrap_or(&self.config.federation_name);
        let distribution_key = options
            .distribution_key
            .as_deref()
            .unwrap_or(&self.config.distribution_key);

        validate_identifier(federation)?;
        validate_identifier(distribution_key)?;

        Ok(Selection {
            value,
            federation: federation.to_string(),
            distribution_key: distribution_key.to_string(),
            filtering: options
                .filtering_enabled
                .unwrap_or(self.config.filtering_enabled),
        })
    }

    fn switch_sql(&self, selection: &Selection) -> String {
        format!(
            "USE FEDERATION {} ({} = ?) WITH RESET, FILTERING = {}",
            self.platform.quote_identifier(&selection.federation),
            self.platform.quote_identifier(&selection.distribution_key),
            if selection.filtering { "ON" } else { "OFF" }
        )
    }

    fn fan_out(&mut self, shards: &[Shard], sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for shard in shards {
            self.select_shard(shard.range_low.clone())?;
            let fetched = self.conn.fetch_all(sql, params)?;
            debug!(
                target: "sharding",
                member = %shard.id,
                rows = fetched.len(),
                "Fetched rows from federation member"
            );
            rows.extend(fetched);
        }
        Ok(rows)
    }

    fn restore(&mut self, previous: Option<Selection>) -> Result<()> {
        match previous {
            None => self.select_global(),
            Some(selection) => {
                let options = selection.options();
                self.select_shard_with(selection.value.into(), &options)
            }
        }
    }
}

impl<C: Connection, P: Platform> ShardManager for SqlAzureShardManager<C, P> {
    fn select_global(&mut self) -> Result<()> {
        self.ensure_no_transaction()?;
        debug!(target: "sharding", "Switching to federation root");
        self.conn.execute(SELECT_ROOT_SQL, &[])?;
        self.current = None;
        Ok(())
    }

    fn select_shard(&mut self, value: SqlValue) -> Result<()> {
        self.select_shard_with(value, &SelectOptions::default())
    }

    fn select_shards(&mut self, _values: &[SqlValue]) -> Result<()> {
        Err(ShardingError::NotImplemented("select_shards"))
    }

    fn current_distribution_value(&self) -> Option<&DistributionValue> {
        self.current.as_ref().map(|s| &s.value)
    }

    fn get_shards(&mut self) -> Result<Vec<Shard>> {
        let rows = self.conn.fetch_all(
            PARTITION_CATALOG_SQL,
            &[SqlValue::Text(self.config.federation_name.clone())],
        )?;
        let shards = rows
            .iter()
            .map(Shard::from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(
            target: "sharding",
            federation = %self.config.federation_name,
            members = shards.len(),
            "Loaded federation members"
        );
        Ok(shards)
    }

    fn query_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let shards = self.get_shards()?;
        let previous = self.current.clone();

        let outcome = self.fan_out(&shards, sql, params);
        let restored = self.restore(previous);

        match (outcome, restored) {
            (Ok(rows), Ok(())) => Ok(rows),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(restore_err)) => {
                warn!(
                    target: "sharding",
                    error = %restore_err,
                    "Failed to restore federation context after fan-out error"
                );
                Err(e)
            }
        }
    }
}
