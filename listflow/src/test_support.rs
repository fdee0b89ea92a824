//! Test-only helpers for constructing tasks and scratch stores.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::task_store::{StoreConfig, TaskStore};
use crate::task::Task;

/// Create an open task.
pub fn pending(id: u64, name: &str) -> Task {
    Task::new(id, name)
}

/// Create a completed task.
pub fn done(id: u64, name: &str) -> Task {
    Task {
        completed: true,
        ..Task::new(id, name)
    }
}

/// `count` open tasks named `task 1` .. `task N` with matching ids.
pub fn numbered(count: u64) -> Vec<Task> {
    (1..=count)
        .map(|id| pending(id, &format!("task {}", id)))
        .collect()
}

/// Small mixed list used across tests.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        pending(1, "Buy milk"),
        done(2, "Call mom"),
        pending(3, "Write report"),
    ]
}

/// Temporary directory holding a task file, removed on drop.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::new(StoreConfig {
            path: self.tasks_path(),
        })
    }

    /// Seed the task file with `tasks`.
    pub fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.store().save(tasks)
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>> {
        self.store().load()
    }
}
