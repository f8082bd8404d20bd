//! MongoDB connection configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONNECTION_STRING_VAR: &str = "MONGORM_CONNECTION_STRING";
pub const DATABASE_NAME_VAR: &str = "MONGORM_DATABASE_NAME";
pub const APP_NAME_VAR: &str = "MONGORM_APP_NAME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where and how to connect to MongoDB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`
    pub connection_string: String,
    /// Database holding the entity collections
    pub database_name: String,
    /// Application name reported to the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl MongoConfig {
    pub fn new(connection_string: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database_name: database_name.into(),
            app_name: None,
        }
    }

    /// Set the application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Load from `MONGORM_*` environment variables, honoring a `.env` file
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MongoConfig = toml::from_str(content)?;
        config.validate()
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            connection_string: lookup(CONNECTION_STRING_VAR)
                .ok_or(ConfigError::Missing(CONNECTION_STRING_VAR))?,
            database_name: lookup(DATABASE_NAME_VAR).ok_or(ConfigError::Missing(DATABASE_NAME_VAR))?,
            app_name: lookup(APP_NAME_VAR).filter(|name| !name.is_empty()),
        };
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.connection_string.trim().is_empty() {
            return Err(ConfigError::Missing("connection_string"));
        }
        if self.database_name.trim().is_empty() {
            return Err(ConfigError::Missing("database_name"));
        }
        Ok(self)
    }
}
