//! Tool configuration
//!
//! Defaults, overridden by the first config file found in the working
//! directory, overridden by environment variables.

use crate::error::{AppError, Result};
use crate::services::catalog::{INDICATOR_CATALOG, PRICE_DATA_CATALOG};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config files checked in order; the first one that exists wins
pub const CONFIG_CANDIDATES: &[&str] = &["config.toml", "stock_data_config.toml", "config.json"];

/// Store location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/stock_data.duckdb"),
        }
    }
}

/// A-share export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub preview_limit: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("all_a_stocks.csv"),
            preview_limit: crate::services::export_service::DEFAULT_PREVIEW_LIMIT,
        }
    }
}

/// Tables checked by the verification tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    pub indicator_table: String,
    pub price_table: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            indicator_table: INDICATOR_CATALOG.table.to_string(),
            price_table: PRICE_DATA_CATALOG.table.to_string(),
        }
    }
}

/// Test harness settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory scripts run in; relative script paths resolve against it
    pub working_dir: PathBuf,
    /// Program each script is passed to; scripts run directly when unset
    pub interpreter: Option<String>,
    pub scripts: Vec<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            interpreter: Some("python3".to_string()),
            scripts: [
                "test/test_system.py",
                "test/test_stock_list_simple.py",
                "test/test_stock_list.py",
                "test/test_api.py",
                "test/test_api_get_stock_list.py",
                "test/test_clean_db.py",
                "test/test_jqdata_stocks.py",
                "test/test_real_stocks.py",
                "test/test_real_bj_stocks.py",
                "test/test_sz_sh_stocks.py",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
    pub verify: VerifyConfig,
    pub harness: HarnessConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from the working directory and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match CONFIG_CANDIDATES.iter().map(Path::new).find(|p| p.exists()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML or JSON config file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");

        let config = if is_json {
            serde_json::from_str(&text)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            toml::from_str(&text)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?
        };

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `STOCK_DB_PATH`, `STOCK_EXPORT_PATH` and `LOG_LEVEL` overrides
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOCK_DB_PATH").filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(path) = lookup("STOCK_EXPORT_PATH").filter(|v| !v.is_empty()) {
            self.export.path = PathBuf::from(path);
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.logging.level = level.to_lowercase();
        }
    }
}
