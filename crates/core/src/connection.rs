//! The database connection collaborator.
//!
//! The router never opens connections itself. It borrows one that can report
//! its parameters and transaction state and run parameterised statements.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::value::SqlValue;

/// Parameters the connection was opened with, e.g. `federationName`.
pub type ConnectionParams = HashMap<String, serde_json::Value>;

/// A result row keyed by column alias.
pub type Row = BTreeMap<String, SqlValue>;

/// Failure reported by the underlying driver.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct DatabaseError {
    pub message: String,
    /// Server-side error number, when the driver exposes one.
    pub code: Option<i32>,
}

impl DatabaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }
}

pub trait Connection {
    fn params(&self) -> &ConnectionParams;

    fn is_transaction_active(&self) -> bool;

    /// Execute a statement, binding `params` to its `?` placeholders in order.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), DatabaseError>;

    fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DatabaseError>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn params(&self) -> &ConnectionParams {
        (**self).params()
    }

    fn is_transaction_active(&self) -> bool {
        (**self).is_transaction_active()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), DatabaseError> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DatabaseError> {
        (**self).fetch_all(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn params(&self) -> &ConnectionParams {
        (**self).params()
    }

    fn is_transaction_active(&self) -> bool {
        (**self).is_transaction_active()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), DatabaseError> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DatabaseError> {
        (**self).fetch_all(sql, params)
    }
}
