//! Read-only listing: filter, then sort, then number.

use std::fmt;

use super::types::{Filter, SortKey};
use crate::task::Task;

/// One displayed row. `position` is 1-based within the view, not the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedTask<'a> {
    pub position: usize,
    pub task: &'a Task,
}

impl fmt::Display for ListedTask<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} - {}",
            self.position,
            self.task.name,
            self.task.status_label()
        )
    }
}

/// Build the display view of `tasks`. Sorting is stable; `None` keeps the
/// stored order.
pub fn list_tasks(tasks: &[Task], filter: Filter, sort: Option<SortKey>) -> Vec<ListedTask<'_>> {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .collect();

    match sort {
        Some(SortKey::Name) => selected.sort_by_cached_key(|task| task.name.to_lowercase()),
        Some(SortKey::Status) => selected.sort_by_key(|task| task.completed),
        Some(SortKey::Entry) => selected.sort_by_key(|task| task.id),
        None => {}
    }

    selected
        .into_iter()
        .enumerate()
        .map(|(index, task)| ListedTask {
            position: index + 1,
            task,
        })
        .collect()
}
