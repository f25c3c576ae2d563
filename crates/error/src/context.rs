//! # Error Contexts
//!
//! Structured metadata attached to errors for programmatic handling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorContext {
    /// Context for FEDSQL-3001/3002/3006 (connection parameter errors)
    Params {
        parameter: String,
        available_parameters: Vec<String>,
    },

    /// Context for FEDSQL-3003/3005 (federated table metadata errors)
    FederatedTable {
        table: String,
        federation: Option<String>,
        missing_option: Option<String>,
    },

    /// Context for FEDSQL-3007 (config file errors)
    Config {
        file_path: Option<String>,
        line: Option<usize>,
        field: Option<String>,
    },

    /// Generic key-value context for extensibility
    Generic {
        #[serde(flatten)]
        data: std::collections::HashMap<String, serde_json::Value>,
    },
}
