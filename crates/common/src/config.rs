use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

// Default constants
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_STATEMENT_TERMINATOR: &str = "";

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Serialize, Deserialize, Default, Clone, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ddl: DdlConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    #[validate(custom(function = "validate_log_level"))]
    pub level: String,

    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_ansi(),
        }
    }
}

/// Rendering options for emitted DDL scripts.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DdlConfig {
    /// Appended to every statement except batch separators (e.g. ";").
    #[serde(default = "default_statement_terminator")]
    pub statement_terminator: String,
}

impl Default for DdlConfig {
    fn default() -> Self {
        Self {
            statement_terminator: default_statement_terminator(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_ansi() -> bool {
    true
}

fn default_statement_terminator() -> String {
    DEFAULT_STATEMENT_TERMINATOR.to_string()
}

fn validate_log_level(level: &str) -> Result<(), validator::ValidationError> {
    // Accept full EnvFilter directives like "fedsql_core=debug,warn"
    if level.contains('=') || level.contains(',') {
        return Ok(());
    }
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_log_level"))
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file at {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .context(format!("Failed to parse config file at {}", path.display()))?;
        config.finish()
    }

    /// Load the config file if one exists, falling back to defaults.
    ///
    /// Lookup: `FEDSQL_CONFIG`, then `~/.fedsql/config.yaml`.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            AppConfig::default().finish()
        }
    }

    fn finish(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("FEDSQL_LOG") {
            self.logging.level = level;
        }
        self.validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {:?}", e))?;
        Ok(self)
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("FEDSQL_CONFIG") {
        return PathBuf::from(path);
    }

    match dirs::home_dir() {
        Some(home) => home.join(".fedsql").join("config.yaml"),
        None => PathBuf::from(".fedsql/config.yaml"),
    }
}
