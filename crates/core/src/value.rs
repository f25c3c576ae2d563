//! Values bound to statements and the subset usable as distribution keys.

use std::fmt;
use uuid::Uuid;

use crate::error::ShardingError;

/// A value bound as a positional statement parameter or read from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Guid(Uuid),
}

impl SqlValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "boolean",
            SqlValue::Int(_) => "integer",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "string",
            SqlValue::Guid(_) => "guid",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => f.write_str(s),
            SqlValue::Guid(g) => write!(f, "{}", g),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Guid(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Identity of a federation member: the distribution key value to switch to.
///
/// Only strings, integers and GUIDs qualify; the root federation is modelled
/// as the absence of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DistributionValue {
    Int(i64),
    Text(String),
    Guid(Uuid),
}

impl fmt::Display for DistributionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionValue::Int(i) => write!(f, "{}", i),
            DistributionValue::Text(s) => f.write_str(s),
            DistributionValue::Guid(g) => write!(f, "{}", g),
        }
    }
}

impl TryFrom<SqlValue> for DistributionValue {
    type Error = ShardingError;

    fn try_from(value: SqlValue) -> Result<Self, Self::Error> {
        match value {
            SqlValue::Int(i) => Ok(DistributionValue::Int(i)),
            SqlValue::Text(s) => Ok(DistributionValue::Text(s)),
            SqlValue::Guid(g) => Ok(DistributionValue::Guid(g)),
            other => Err(ShardingError::InvalidDistributionValue(
                other.kind().to_string(),
            )),
        }
    }
}

impl From<DistributionValue> for SqlValue {
    fn from(value: DistributionValue) -> Self {
        match value {
            DistributionValue::Int(i) => SqlValue::Int(i),
            DistributionValue::Text(s) => SqlValue::Text(s),
            DistributionValue::Guid(g) => SqlValue::Guid(g),
        }
    }
}

impl From<i64> for DistributionValue {
    fn from(v: i64) -> Self {
        DistributionValue::Int(v)
    }
}

impl From<&str> for DistributionValue {
    fn from(v: &str) -> Self {
        DistributionValue::Text(v.to_string())
    }
}

impl From<Uuid> for DistributionValue {
    fn from(v: Uuid) -> Self {
        DistributionValue::Guid(v)
    }
}
