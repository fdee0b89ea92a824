//! Mutating task operations.
//!
//! Every function works on the in-memory collection only and reports what it
//! did; persisting is the caller's job (see `session`).

use super::error::TaskError;
use super::selection::{Selection, resolve};
use super::types::ToggleAction;
use crate::task::{Task, next_id};

/// Append a task named `name` (trimmed) and return a copy of it.
pub fn add_task(tasks: &mut Vec<Task>, name: &str) -> Result<Task, TaskError> {
    let name = non_empty_name(name)?;
    let task = Task::new(next_id(tasks), name);
    tasks.push(task.clone());
    Ok(task)
}

/// Result of a remove batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Removed tasks in their original relative order.
    pub removed: Vec<Task>,
    pub rejected: Vec<TaskError>,
}

impl RemoveOutcome {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Remove every task targeted by `selection`.
///
/// Positions are resolved against the collection as it is before the call,
/// so `"2,5"` always means the second and fifth task regardless of order.
pub fn remove_tasks(tasks: &mut Vec<Task>, selection: &Selection) -> RemoveOutcome {
    let resolved = resolve(selection, tasks.len());
    let mut removed = Vec::with_capacity(resolved.indices.len());
    let mut index = 0;
    tasks.retain(|task| {
        let keep = !resolved.indices.contains(&index);
        if !keep {
            removed.push(task.clone());
        }
        index += 1;
        keep
    });
    RemoveOutcome {
        removed,
        rejected: resolved.rejected,
    }
}

/// Result of a toggle batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    /// Tasks whose flag flipped, after the update.
    pub changed: Vec<Task>,
    /// Selected tasks that were already in the target state.
    pub unchanged: Vec<Task>,
    pub rejected: Vec<TaskError>,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Set `completed` on every selected task according to `action`.
pub fn toggle_tasks(
    tasks: &mut [Task],
    action: ToggleAction,
    selection: &Selection,
) -> ToggleOutcome {
    let resolved = resolve(selection, tasks.len());
    let target = action.completed();
    let mut outcome = ToggleOutcome {
        action,
        changed: Vec::new(),
        unchanged: Vec::new(),
        rejected: resolved.rejected,
    };
    for index in resolved.indices {
        let task = &mut tasks[index];
        if task.completed == target {
            outcome.unchanged.push(task.clone());
        } else {
            task.completed = target;
            outcome.changed.push(task.clone());
        }
    }
    outcome
}

/// A successful rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub previous: String,
    pub task: Task,
}

/// Rename the task at 0-based `index`; id and completion are untouched.
pub fn rename_task(tasks: &mut [Task], index: usize, name: &str) -> Result<Renamed, TaskError> {
    let len = tasks.len();
    let task = tasks.get_mut(index).ok_or(TaskError::NotFound {
        position: index as i64 + 1,
        len,
    })?;
    let name = non_empty_name(name)?;
    let previous = std::mem::replace(&mut task.name, name.to_string());
    Ok(Renamed {
        previous,
        task: task.clone(),
    })
}

fn non_empty_name(name: &str) -> Result<&str, TaskError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyName);
    }
    Ok(trimmed)
}
