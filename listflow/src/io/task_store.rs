//! Task list load/save with schema validation and atomic writes.
//!
//! The task file is assumed to have a single reader and a single writer (one
//! process at a time). No locking is performed; two processes saving the same
//! file concurrently will lose updates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::{debug, info};

use crate::task::Task;

const TASK_LIST_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/task_list/v1.schema.json"
));

/// Where the task list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

/// File-backed task list.
#[derive(Debug, Clone)]
pub struct TaskStore {
    config: StoreConfig,
}

impl TaskStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Load the task list. A missing file is a first run and yields an empty
    /// list.
    pub fn load(&self) -> Result<Vec<Task>> {
        let path = self.path();
        if !path.exists() {
            info!(path = %path.display(), "task file not found, starting with an empty list");
            return Ok(Vec::new());
        }
        let contents =
            fs::read_to_string(path).with_context(|| format!("read tasks {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("parse tasks {}", path.display()))?;
        validate_schema(&value).with_context(|| format!("validate tasks {}", path.display()))?;
        let tasks: Vec<Task> = serde_json::from_value(value)
            .with_context(|| format!("deserialize tasks {}", path.display()))?;
        info!(path = %path.display(), count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Overwrite the task file with `tasks` (temp file + rename).
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let path = self.path();
        let mut buf = serde_json::to_string_pretty(tasks).context("serialize tasks")?;
        buf.push('\n');
        write_atomic(path, &buf)?;
        info!(path = %path.display(), count = tasks.len(), "tasks saved");
        Ok(())
    }
}

fn validate_schema(value: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(TASK_LIST_SCHEMA).context("parse task list schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(value) {
        let messages = compiled
            .iter_errors(value)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "task list schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = tmp_path_for(path);
    debug!(tmp = %tmp_path.display(), "writing temp task file");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp tasks {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace tasks {}", path.display()))?;
    Ok(())
}

/// `tasks.json` -> `tasks.json.tmp`, keeping the original extension visible.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
