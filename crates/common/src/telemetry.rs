//! Logging initialization for fedsql binaries.
//!
//! Libraries only emit `tracing` events; a binary installs the subscriber once
//! at startup. `RUST_LOG` wins over the configured level.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", config.level, e)),
    }
}

/// Install the global subscriber: env filter plus a fmt layer on stderr.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_from_config() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "fedsql_core=debug,warn".to_string(),
            ansi: false,
        };
        let filter = env_filter(&config).unwrap();
        assert!(filter.to_string().contains("fedsql_core=debug"));
    }
}
