use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "inventory.toml";
pub const DEFAULT_DATA_FILE: &str = "data/products.json";
pub const DATA_FILE_ENV: &str = "INVENTORY_DATA_FILE";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// JSON file mirroring the inventory; created on first save.
    /// Resolved as TOML, then `INVENTORY_DATA_FILE`, then `DEFAULT_DATA_FILE`.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`; interpreted by `common::LogFormat::from_config`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> String { "compact".to_string() }

/// Config from `CONFIG_PATH` (or `inventory.toml`); defaults when that file does not exist.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_or_default(&path)
}

pub fn load_or_default(path: &str) -> Result<AppConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_with_env(std::env::var(DATA_FILE_ENV).ok())
    }

    /// Same as `normalize_and_validate` with the `INVENTORY_DATA_FILE` value passed in.
    pub fn normalize_with_env(&mut self, data_file_env: Option<String>) -> Result<()> {
        self.storage.resolve(data_file_env);
        self.storage.validate()
    }
}

impl StorageConfig {
    /// Fill `data_file`: a non-blank TOML value wins, then the env value, then the default.
    pub fn resolve(&mut self, data_file_env: Option<String>) {
        let from_toml = self
            .data_file
            .take()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        let from_env = data_file_env.filter(|v| !v.trim().is_empty()).map(|v| PathBuf::from(v.trim()));
        self.data_file = Some(
            from_toml
                .or(from_env)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        );
    }

    /// The configured data file, or the default before `resolve` has run.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        let data_file = self.data_file();
        let raw = data_file.to_string_lossy();
        if raw.trim().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        if raw.ends_with('/') || raw.ends_with('\\') || data_file.is_dir() {
            return Err(anyhow!("storage.data_file must name a file, got directory {raw}"));
        }
        Ok(())
    }
}
