//! Configuration management for Gearloan

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Which storage backend holds the collections
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    /// Directory holding one JSON document per collection
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared code required to register an admin account
    pub admin_code: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UndoConfig {
    /// How long a deletion can be undone, in milliseconds
    pub window_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub undo: UndoConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix GEARLOAN_)
            .add_source(
                Environment::with_prefix("GEARLOAN")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override data directory from GEARLOAN_DATA_DIR env var if present
            .set_override_option("storage.data_dir", env::var("GEARLOAN_DATA_DIR").ok())?
            // Override admin code from ADMIN_CODE env var if present
            .set_override_option("auth.admin_code", env::var("ADMIN_CODE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::File,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_code: "ADMIN2024".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self { window_ms: 5000 }
    }
}
