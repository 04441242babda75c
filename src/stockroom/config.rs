//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing keys take their defaults,
//! so an absent or partial file is always valid.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `bind` | `127.0.0.1:8001` | Address the HTTP server listens on |
//! | `max_upload_bytes` | `2097152` | Upload size limit (2 MiB) |
//! | `fallback_category` | `other` | Category for imported rows without one |

use crate::error::{Result, StockError};
use crate::model::FALLBACK_CATEGORY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BIND: &str = "127.0.0.1:8001";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

pub const KEYS: &[&str] = &["bind", "max-upload-bytes", "fallback-category"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockroomConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
            fallback_category: default_fallback_category(),
        }
    }
}

impl StockroomConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockError::Io)?;
        let config: StockroomConfig =
            serde_json::from_str(&content).map_err(StockError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockError::Serialization)?;
        fs::write(config_path, content).map_err(StockError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "bind" => Some(self.bind.clone()),
            "max-upload-bytes" => Some(self.max_upload_bytes.to_string()),
            "fallback-category" => Some(self.fallback_category.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "bind" => self.bind = value.to_string(),
            "max-upload-bytes" => {
                self.max_upload_bytes = value.parse().map_err(|_| {
                    StockError::Api(format!("max-upload-bytes must be a number, got {value:?}"))
                })?;
            }
            "fallback-category" => {
                if value.trim().is_empty() {
                    return Err(StockError::Api("fallback-category cannot be empty".into()));
                }
                self.fallback_category = value.trim().to_string();
            }
            other => return Err(StockError::Api(format!("Unknown config key: {other}"))),
        }
        Ok(())
    }
}
