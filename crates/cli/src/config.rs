use anyhow::{Context, Result};
use fedsql_common::config::AppConfig;
use std::path::Path;

/// Resolve the application config.
///
/// Priority: `--config` argument, then `FEDSQL_CONFIG`, then
/// `~/.fedsql/config.yaml`, then built-in defaults.
pub fn load(config_arg: Option<&str>) -> Result<AppConfig> {
    match config_arg {
        Some(path) => AppConfig::from_file(Path::new(path))
            .context(format!("Failed to load config from {}", path)),
        None => AppConfig::load(),
    }
}
