use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::progress::CorruptDataPolicy;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "COURSEHUB_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "coursehub.toml";
/// Prefix for overrides, nested with `__` (`COURSEHUB_SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "COURSEHUB_";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub creator: CreatorConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one `<key>.json` file per stored key.
    pub data_dir: PathBuf,
    pub on_corrupt: CorruptDataPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("./coursehub-data"),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed file to load instead of the embedded catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorConfig {
    /// Name recorded on submissions that do not carry one.
    pub default_submitter: String,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            default_submitter: "Anonymous Creator".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file if present, then environment overrides.
    pub fn figment_from(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn load() -> Result<Self, anyhow::Error> {
        let path = Self::config_path();
        let config = Self::figment_from(&path)
            .extract()
            .map_err(|e| anyhow::anyhow!("Invalid configuration ({}): {e}", path.display()))?;
        Ok(config)
    }
}
