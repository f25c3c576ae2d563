//! Common utilities, types, and configurations shared across fedsql crates.
//!
//! - **Configuration**: Strongly typed application configuration (`config`).
//! - **Schema models**: Platform-neutral schema description with federation options (`models`).
//! - **Telemetry**: Logging setup for binaries (`telemetry`).
pub mod config;
pub mod models;
pub mod telemetry;

pub use crate::models::{
    ColumnConfig, ColumnType, FederationOptions, ForeignKeyConfig, IndexConfig,
    ReferentialAction, SchemaConfig, TableConfig,
};
