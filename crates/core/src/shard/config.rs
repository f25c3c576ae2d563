use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::connection::ConnectionParams;
use crate::error::{Result, ShardingError};
use crate::platform::sanitize::validate_identifier;

pub const FEDERATION_NAME_PARAM: &str = "federationName";
pub const DISTRIBUTION_KEY_PARAM: &str = "distributionKey";
pub const FILTERING_ENABLED_PARAM: &str = "filteringEnabled";

/// Router configuration, fixed for the lifetime of a shard manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShardingConfig {
    #[validate(length(min = 1, max = 128))]
    pub federation_name: String,
    #[validate(length(min = 1, max = 128))]
    pub distribution_key: String,
    #[serde(default)]
    pub filtering_enabled: bool,
}

impl ShardingConfig {
    pub fn new(federation_name: impl Into<String>, distribution_key: impl Into<String>) -> Self {
        Self {
            federation_name: federation_name.into(),
            distribution_key: distribution_key.into(),
            filtering_enabled: false,
        }
    }

    pub fn with_filtering(mut self, enabled: bool) -> Self {
        self.filtering_enabled = enabled;
        self
    }

    /// Extract the sharding options from a connection's parameters.
    pub fn from_params(params: &ConnectionParams) -> Result<Self> {
        let federation_name = required_string(params, FEDERATION_NAME_PARAM)?
            .ok_or(ShardingError::MissingFederationName)?;
        let distribution_key = required_string(params, DISTRIBUTION_KEY_PARAM)?
            .ok_or(ShardingError::MissingDistributionKey)?;
        let filtering_enabled = match params.get(FILTERING_ENABLED_PARAM) {
            None | Some(Value::Null) => false,
            Some(value) => parse_flag(value).ok_or_else(|| ShardingError::InvalidParameter {
                name: FILTERING_ENABLED_PARAM.to_string(),
                expected: "a boolean",
            })?,
        };

        let config = Self {
            federation_name,
            distribution_key,
            filtering_enabled,
        };
        config.check_identifiers()?;
        Ok(config)
    }

    /// Reject federation or key names that cannot be spliced into a
    /// `USE FEDERATION` statement.
    pub fn check_identifiers(&self) -> Result<()> {
        validate_identifier(&self.federation_name)?;
        validate_identifier(&self.distribution_key)
    }
}

/// `Ok(None)` when the parameter is absent, null or empty.
fn required_string(params: &ConnectionParams, name: &str) -> Result<Option<String>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ShardingError::InvalidParameter {
            name: name.to_string(),
            expected: "a string",
        }),
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "" | "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
