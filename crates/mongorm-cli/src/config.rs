//! Configuration resolution for the MongoRM CLI
//!
//! Looks for connection settings in, in order: the `--config` file,
//! ~/.config/mongorm/config.toml, then `MONGORM_*` environment variables.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use mongorm_mongodb::MongoConfig;

const CONFIG_DIR: &str = "mongorm";
const CONFIG_FILE: &str = "config.toml";

/// Get the default config file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join(CONFIG_DIR);
    Ok(config_dir.join(CONFIG_FILE))
}

/// Resolve the MongoDB configuration
pub fn resolve(explicit: Option<&Path>) -> Result<MongoConfig> {
    if let Some(path) = explicit {
        return MongoConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = config_path()?;
    if default_path.exists() {
        tracing::debug!("Using config file {:?}", default_path);
        return MongoConfig::load(&default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path));
    }

    MongoConfig::from_env().context("No config file found and environment is incomplete")
}
