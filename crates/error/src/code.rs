use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error codes following FEDSQL-XXXX format.
///
/// ## Code Ranges
/// - **1000-1999**: Connection / database errors
/// - **2000-2999**: Routing errors
/// - **3000-3999**: Configuration errors
/// - **5000-5999**: Internal errors
///
/// Codes are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[non_exhaustive]
pub enum ErrorCode {
    // === Connection Errors (1000-1999) ===
    /// FEDSQL-1001: The database rejected a statement
    DatabaseError = 1001,

    // === Routing Errors (2000-2999) ===
    /// FEDSQL-2001: Shard switch attempted inside an open transaction
    TransactionActive = 2001,
    /// FEDSQL-2002: Distribution value is null, boolean or not a scalar
    InvalidDistributionValue = 2002,

    // === Configuration Errors (3000-3999) ===
    /// FEDSQL-3001: Connection parameters lack a federation name
    MissingFederationName = 3001,
    /// FEDSQL-3002: Connection parameters lack a distribution key
    MissingDistributionKey = 3002,
    /// FEDSQL-3003: Federated table lacks discriminator metadata
    MissingFederationMetadata = 3003,
    /// FEDSQL-3004: Identifier contains forbidden characters
    InvalidIdentifier = 3004,
    /// FEDSQL-3005: Column referenced by metadata does not exist
    UnknownColumn = 3005,
    /// FEDSQL-3006: Connection parameter has the wrong type
    InvalidParameter = 3006,
    /// FEDSQL-3007: Invalid YAML syntax
    InvalidYaml = 3007,

    // === Internal Errors (5000-5999) ===
    /// FEDSQL-5004: Feature not implemented
    NotImplemented = 5004,

    /// FEDSQL-9999: Unknown/unclassified error
    Unknown = 9999,
}

impl ErrorCode {
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the formatted code string (e.g., "FEDSQL-2001")
    pub fn as_str(&self) -> String {
        format!("FEDSQL-{:04}", self.as_u16())
    }

    pub fn category(&self) -> ErrorCategory {
        match self.as_u16() {
            1000..=1999 => ErrorCategory::Connection,
            2000..=2999 => ErrorCategory::Routing,
            3000..=3999 => ErrorCategory::Config,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> String {
        code.as_str()
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        let num: u16 = s
            .strip_prefix("FEDSQL-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| "Invalid format".to_string())?;
        Self::try_from(num).map_err(|_| "Unknown code".to_string())
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(n: u16) -> std::result::Result<Self, Self::Error> {
        match n {
            1001 => Ok(Self::DatabaseError),
            2001 => Ok(Self::TransactionActive),
            2002 => Ok(Self::InvalidDistributionValue),
            3001 => Ok(Self::MissingFederationName),
            3002 => Ok(Self::MissingDistributionKey),
            3003 => Ok(Self::MissingFederationMetadata),
            3004 => Ok(Self::InvalidIdentifier),
            3005 => Ok(Self::UnknownColumn),
            3006 => Ok(Self::InvalidParameter),
            3007 => Ok(Self::InvalidYaml),
            5004 => Ok(Self::NotImplemented),
            9999 => Ok(Self::Unknown),
            _ => Err(format!("Unknown error code: {}", n)),
        }
    }
}

/// High-level error category, used for exit-code mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCategory {
    Connection,
    Routing,
    Config,
    Internal,
}
