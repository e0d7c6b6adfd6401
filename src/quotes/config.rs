//! # Configuration
//!
//! Stored as `config.json` in the data directory. A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store-file` | `quotes_collection.json` | Collection file, relative to the data directory |
//! | `write-mode` | `atomic` | `atomic` (temp file + rename) or `direct` (overwrite in place) |
//! | `serialize-writes` | `true` | Hold an in-process lock across add/rate load-mutate-save |
//! | `per-page` | `10` | Default page size for listings |

use crate::error::{QuotesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORE_FILE: &str = "quotes_collection.json";
pub const DEFAULT_PER_PAGE: usize = 10;

pub const CONFIG_KEYS: &[&str] = &["store-file", "write-mode", "serialize-writes", "per-page"];

/// How the collection file is replaced on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Write a sibling temp file, then rename it over the store.
    #[default]
    Atomic,
    /// Truncate and rewrite the store in place.
    Direct,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Atomic => write!(f, "atomic"),
            WriteMode::Direct => write!(f, "direct"),
        }
    }
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atomic" => Ok(WriteMode::Atomic),
            "direct" => Ok(WriteMode::Direct),
            other => Err(format!(
                "Unknown write mode: {} (expected atomic or direct)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotesConfig {
    #[serde(default = "default_store_file")]
    pub store_file: String,

    #[serde(default)]
    pub write_mode: WriteMode,

    #[serde(default = "default_true")]
    pub serialize_writes: bool,

    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            write_mode: WriteMode::default(),
            serialize_writes: true,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl QuotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuotesError::Io)?;
        let config: QuotesConfig =
            serde_json::from_str(&content).map_err(QuotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuotesError::Serialization)?;
        fs::write(config_path, content).map_err(QuotesError::Io)?;
        Ok(())
    }

    /// Absolute path of the collection file for a data directory.
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store_file)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store-file" => Some(self.store_file.clone()),
            "write-mode" => Some(self.write_mode.to_string()),
            "serialize-writes" => Some(self.serialize_writes.to_string()),
            "per-page" => Some(self.per_page.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "store-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("store-file cannot be empty".to_string());
                }
                self.store_file = value.to_string();
            }
            "write-mode" => self.write_mode = value.parse()?,
            "serialize-writes" => {
                self.serialize_writes = value
                    .parse()
                    .map_err(|_| format!("Invalid boolean: {}", value))?;
            }
            "per-page" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid number: {}", value))?;
                if !(1..=50).contains(&n) {
                    return Err("per-page must be between 1 and 50".to_string());
                }
                self.per_page = n;
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}
