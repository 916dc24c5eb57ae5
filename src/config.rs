/// Configuration for wordcount
///
/// Values come from, highest priority first:
/// 1. CLI flags and their environment variables (applied in main)
/// 2. The config file (~/.wordcount/config.toml)
/// 3. Built-in defaults

use crate::error::{Result, WordCountError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const APP_DIR: &str = ".wordcount";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "entries.db";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Settings read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database
    pub database_path: PathBuf,

    /// Log filter used when RUST_LOG isn't set
    pub log_level: String,

    /// Default output format
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: app_dir().join(DATABASE_FILE),
            log_level: "warn".to_string(),
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load the configuration
    ///
    /// With `path` set the file must exist. Without it the default location
    /// is tried and a missing file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WordCountError::Config(format!("could not read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&contents)
            .map_err(|e| WordCountError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse config from TOML text
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Directory holding the database and config file
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Where the config file is looked for when none is given
pub fn default_config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}
