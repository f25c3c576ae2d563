//! fedsql core: routing and schema generation for federated SQL databases.
//!
//! A federation splits one logical schema into a root store and a set of
//! members, each owning a range of a distribution key. This crate provides:
//!
//! - **Shard routing** (`shard`): switch one connection between the root and
//!   federation members, list members, and fan a read out over all of them.
//! - **Federation DDL** (`ddl`): turn a schema description into `CREATE
//!   FEDERATION` statements plus per-federation table and foreign-key DDL.
//!
//! The database driver and SQL rendering are collaborators behind the
//! [`Connection`] and [`Platform`] traits.
//!
//! ```text
//!   schema ──► ddl::generate ──► [CREATE FEDERATION, GO, USE FEDERATION…, GO, CREATE TABLE…]
//!
//!   app ──► SqlAzureShardManager ──► Connection (USE FEDERATION … WITH RESET)
//! ```

pub mod connection;
pub mod ddl;
pub mod error;
pub mod platform;
pub mod shard;
pub mod value;

pub use connection::{Connection, ConnectionParams, DatabaseError, Row};
pub use ddl::{generate, FederationDdl, FederationDescriptor};
pub use error::{Result, ShardingError};
pub use platform::{Platform, SqlAzurePlatform};
pub use shard::{SelectOptions, Shard, ShardManager, ShardingConfig, SqlAzureShardManager};
pub use value::{DistributionValue, SqlValue};
