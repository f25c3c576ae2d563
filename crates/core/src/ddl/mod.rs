//! Federation DDL generation.
//!
//! Tables are folded into per-federation buckets, then flushed as:
//!
//! ```text
//! CREATE FEDERATION <name> (<distribution> <type>)   -- one per federation
//! GO / USE FEDERATION … / GO / CREATE TABLE …         -- table buckets
//! GO / USE FEDERATION … / GO / ALTER TABLE … FOREIGN KEY … -- foreign-key buckets
//! ```

mod federation;

pub use federation::{
    generate, placeholder_value, FederationDdl, FederationDescriptor, BATCH_SEPARATOR,
    NIL_GUID, ROOT_FEDERATION,
};
