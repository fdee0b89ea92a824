//! ListFlow configuration stored in `listflow.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::task_store::StoreConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "listflow.toml";

/// ListFlow configuration (TOML).
///
/// Missing fields default to the values the tool has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListflowConfig {
    /// Task list file, relative to the working directory unless absolute.
    pub tasks_file: PathBuf,

    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Diagnostic log file.
    pub file: PathBuf,

    /// Rotate the log once it would grow beyond this many bytes.
    pub max_bytes: u64,

    /// Rotated files kept next to the active one (`<file>.1` .. `<file>.N`).
    pub backups: usize,

    /// Fallback level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("listflow.log"),
            max_bytes: 5 * 1024 * 1024,
            backups: 3,
            level: "info".to_string(),
        }
    }
}

impl Default for ListflowConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from("tasks.json"),
            log: LogConfig::default(),
        }
    }
}

impl ListflowConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tasks_file.as_os_str().is_empty() {
            return Err(anyhow!("tasks_file must be a non-empty path"));
        }
        if self.log.file.as_os_str().is_empty() {
            return Err(anyhow!("log.file must be a non-empty path"));
        }
        if self.log.max_bytes == 0 {
            return Err(anyhow!("log.max_bytes must be > 0"));
        }
        if !matches!(
            self.log.level.trim().to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(anyhow!(
                "log.level must be one of trace, debug, info, warn, error, off"
            ));
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.tasks_file.clone(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ListflowConfig::default()`.
pub fn load_config(path: &Path) -> Result<ListflowConfig> {
    if !path.exists() {
        let cfg = ListflowConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ListflowConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
