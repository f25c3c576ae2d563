//! Structured exit codes for machine-readable error handling.
//!
//! These codes let CI pipelines tell a broken schema apart from other failures.

/// Success (standard convention)
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error (fallback for unknown errors)
pub const GENERAL_ERROR: i32 = 1;

/// CLI usage error (invalid arguments, missing flags)
pub const USAGE_ERROR: i32 = 2;

/// Configuration error (YAML parse failure, missing federation metadata)
pub const CONFIG_ERROR: i32 = 3;

/// Connection error (database failure reported by the driver)
pub const CONNECTION_ERROR: i32 = 4;

/// Routing error (invalid distribution value, switch inside a transaction)
pub const VALIDATION_ERROR: i32 = 5;
