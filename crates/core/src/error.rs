use fedsql_error::{ErrorCode, ErrorContext, FedError};
use thiserror::Error;

use crate::connection::DatabaseError;

#[derive(Debug, Error)]
pub enum ShardingError {
    #[error("SQL Azure requires a federation name to be set during sharding configuration.")]
    MissingFederationName,

    #[error("SQL Azure requires a distribution key to be set during sharding configuration.")]
    MissingDistributionKey,

    #[error("Connection parameter '{name}' must be {expected}")]
    InvalidParameter { name: String, expected: &'static str },

    #[error("Table '{table}' is part of federation '{federation}' but is missing the '{option}' option")]
    MissingFederationMetadata {
        table: String,
        federation: String,
        option: &'static str,
    },

    #[error("Column '{column}' used to federate table '{table}' on '{federation}' does not exist")]
    UnknownColumn {
        table: String,
        federation: String,
        column: String,
    },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Cannot switch shard during an active transaction.")]
    TransactionActive,

    #[error("You have to specify a string, integer or GUID as shard distribution value, got {0}.")]
    InvalidDistributionValue(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ShardingError {
    /// Fatal errors caused by connection parameters or schema metadata.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ShardingError::MissingFederationName
                | ShardingError::MissingDistributionKey
                | ShardingError::InvalidParameter { .. }
                | ShardingError::MissingFederationMetadata { .. }
                | ShardingError::UnknownColumn { .. }
                | ShardingError::InvalidIdentifier(_)
        )
    }

    pub fn to_fed_error(self) -> FedError {
        let message = self.to_string();
        match self {
            ShardingError::MissingFederationName => {
                FedError::new(ErrorCode::MissingFederationName, message)
                    .with_context(ErrorContext::Params {
                        parameter: "federationName".to_string(),
                        available_parameters: vec![],
                    })
                    .with_hint("Add 'federationName' to the connection parameters")
            }
            ShardingError::MissingDistributionKey => {
                FedError::new(ErrorCode::MissingDistributionKey, message)
                    .with_context(ErrorContext::Params {
                        parameter: "distributionKey".to_string(),
                        available_parameters: vec![],
                    })
                    .with_hint("Add 'distributionKey' to the connection parameters")
            }
            ShardingError::InvalidParameter { name, .. } => {
                FedError::new(ErrorCode::InvalidParameter, message).with_context(
                    ErrorContext::Params {
                        parameter: name,
                        available_parameters: vec![],
                    },
                )
            }
            ShardingError::MissingFederationMetadata {
                table,
                federation,
                option,
            } => FedError::new(ErrorCode::MissingFederationMetadata, message)
                .with_context(ErrorContext::FederatedTable {
                    table,
                    federation: Some(federation),
                    missing_option: Some(option.to_string()),
                })
                .with_hint("Federated tables need both a distribution name and a column"),
            ShardingError::UnknownColumn {
                table, federation, ..
            } => FedError::new(ErrorCode::UnknownColumn, message).with_context(
                ErrorContext::FederatedTable {
                    table,
                    federation: Some(federation),
                    missing_option: None,
                },
            ),
            ShardingError::InvalidIdentifier(_) => {
                FedError::new(ErrorCode::InvalidIdentifier, message)
                    .with_hint("Identifiers must not contain quotes, brackets, ';' or NUL bytes")
            }
            ShardingError::TransactionActive => {
                FedError::new(ErrorCode::TransactionActive, message)
                    .with_hint("Commit or roll back the transaction, then switch shards")
            }
            ShardingError::InvalidDistributionValue(_) => {
                FedError::new(ErrorCode::InvalidDistributionValue, message)
            }
            ShardingError::NotImplemented(_) => FedError::new(ErrorCode::NotImplemented, message),
            ShardingError::Database(e) => {
                let mut error = FedError::new(ErrorCode::DatabaseError, message);
                if let Some(code) = e.code {
                    let mut data = std::collections::HashMap::new();
                    data.insert("server_code".to_string(), serde_json::Value::from(code));
                    error = error.with_context(ErrorContext::Generic { data });
                }
                error
            }
        }
    }
}

impl From<ShardingError> for FedError {
    fn from(err: ShardingError) -> Self {
        err.to_fed_error()
    }
}

pub type Result<T> = std::result::Result<T, ShardingError>;
