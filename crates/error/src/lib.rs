//! Coded errors shared by the fedsql crates.
//!
//! Router and DDL failures are raised as `ShardingError` inside
//! `fedsql-core` and lowered into a [`FedError`] at the CLI boundary. A
//! `FedError` keeps the `FEDSQL-XXXX` code that selects the exit status,
//! plus whatever table, parameter or file context explains the failure.

mod code;
mod context;

pub use code::{ErrorCategory, ErrorCode};
pub use context::ErrorContext;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FedError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Printed after the message, e.g. which schema option to set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FedError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

/// `[FEDSQL-3003] message (Hint: ...)`
impl fmt::Display for FedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        match &self.hint {
            Some(hint) => write!(f, " (Hint: {})", hint),
            None => Ok(()),
        }
    }
}

impl std::error::Error for FedError {}

pub type Result<T> = std::result::Result<T, FedError>;
