use serde::{Deserialize, Serialize};

/// A single entry of the task list as persisted on disk.
///
/// Older lists used the Portuguese keys `nome`/`concluida`; both spellings
/// load, saves always use the English keys.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "concluida")]
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Human-facing status label.
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

/// Id for the next task appended to `tasks`.
///
/// Ids are `len + 1` at assignment time and are never renumbered, so they can
/// repeat once tasks have been removed. Never use them as removal keys.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.len() as u64 + 1
}
