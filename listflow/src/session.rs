//! Read-modify-persist orchestration over the task list.
//!
//! A [`Session`] is loaded once, then each operation runs the pure core logic
//! and saves the whole list when, and only when, something changed. Each
//! outcome is logged exactly once; rejected batch tokens are logged
//! individually.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::error::TaskError;
use crate::core::operations::{
    Renamed, RemoveOutcome, ToggleOutcome, add_task, remove_tasks, rename_task, toggle_tasks,
};
use crate::core::selection::{Selection, parse_position};
use crate::core::types::{Filter, SortKey, ToggleAction};
use crate::core::view::{ListedTask, list_tasks};
use crate::io::task_store::TaskStore;
use crate::task::Task;

/// Outcome of [`Session::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Task),
    Rejected(TaskError),
}

/// Outcome of [`Session::rename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(Renamed),
    Rejected(TaskError),
}

pub struct Session {
    store: TaskStore,
    tasks: Vec<Task>,
}

impl Session {
    /// Load the list behind `store`.
    pub fn open(store: TaskStore) -> Result<Self> {
        let tasks = store.load().context("load task list")?;
        Ok(Self { store, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn list(&self, filter: Filter, sort: Option<SortKey>) -> Vec<ListedTask<'_>> {
        let view = list_tasks(&self.tasks, filter, sort);
        info!(
            filter = %filter,
            sort = ?sort,
            shown = view.len(),
            total = self.tasks.len(),
            "listed tasks"
        );
        view
    }

    pub fn add(&mut self, name: &str) -> Result<AddOutcome> {
        match add_task(&mut self.tasks, name) {
            Ok(task) => {
                self.persist()?;
                info!(id = task.id, name = %task.name, "task added");
                Ok(AddOutcome::Added(task))
            }
            Err(err) => {
                log_rejection("add", &err);
                Ok(AddOutcome::Rejected(err))
            }
        }
    }

    pub fn remove(&mut self, selection: &Selection) -> Result<RemoveOutcome> {
        let outcome = remove_tasks(&mut self.tasks, selection);
        for err in &outcome.rejected {
            log_rejection("remove", err);
        }
        if outcome.changed() {
            self.persist()?;
            info!(
                removed = outcome.removed.len(),
                remaining = self.tasks.len(),
                "tasks removed"
            );
        } else {
            info!("nothing removed");
        }
        Ok(outcome)
    }

    pub fn toggle(&mut self, action: ToggleAction, selection: &Selection) -> Result<ToggleOutcome> {
        let outcome = toggle_tasks(&mut self.tasks, action, selection);
        for err in &outcome.rejected {
            log_rejection("toggle", err);
        }
        if outcome.changed() {
            self.persist()?;
            info!(
                action = %action,
                changed = outcome.changed.len(),
                unchanged = outcome.unchanged.len(),
                "tasks toggled"
            );
        } else {
            info!(action = %action, "nothing changed");
        }
        Ok(outcome)
    }

    /// Validate a 1-based position token against the current list.
    ///
    /// Returns the 0-based index for [`Session::rename`].
    pub fn resolve_position(&self, token: &str) -> std::result::Result<usize, TaskError> {
        parse_position(token, self.tasks.len()).inspect_err(|err| log_rejection("edit", err))
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<RenameOutcome> {
        match rename_task(&mut self.tasks, index, name) {
            Ok(renamed) => {
                self.persist()?;
                info!(
                    id = renamed.task.id,
                    from = %renamed.previous,
                    to = %renamed.task.name,
                    "task renamed"
                );
                Ok(RenameOutcome::Renamed(renamed))
            }
            Err(err) => {
                log_rejection("edit", &err);
                Ok(RenameOutcome::Rejected(err))
            }
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.tasks).context("save task list")
    }
}

/// Log a recoverable input error at `warn`.
pub fn log_rejection(operation: &str, err: &TaskError) {
    warn!(operation, kind = err.kind(), error = %err, "input rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestStore, done, numbered, pending, sample_tasks};

    fn seeded(tasks: &[Task]) -> (TestStore, Session) {
        let scratch = TestStore::new().expect("store");
        scratch.write_tasks(tasks).expect("seed");
        let session = Session::open(scratch.store()).expect("open");
        (scratch, session)
    }

    #[test]
    fn add_persists_new_task() {
        let (scratch, mut session) = seeded(&sample_tasks());
        let outcome = session.add("Pay rent").expect("add");
        assert_eq!(outcome, AddOutcome::Added(pending(4, "Pay rent")));
        assert_eq!(scratch.read_tasks().expect("read").len(), 4);
    }

    #[test]
    fn rejected_add_does_not_touch_file() {
        let scratch = TestStore::new().expect("store");
        let mut session = Session::open(scratch.store()).expect("open");
        let outcome = session.add("   ").expect("add");
        assert_eq!(outcome, AddOutcome::Rejected(TaskError::EmptyName));
        assert!(!scratch.tasks_path().exists());
    }

    #[test]
    fn remove_all_persists_empty_list() {
        let (scratch, mut session) = seeded(&numbered(3));
        let outcome = session.remove(&Selection::All).expect("remove");
        assert_eq!(outcome.removed.len(), 3);
        assert!(scratch.read_tasks().expect("read").is_empty());
    }

    #[test]
    fn failed_remove_skips_save() {
        let scratch = TestStore::new().expect("store");
        let mut session = Session::open(scratch.store()).expect("open");
        let outcome = session.remove(&Selection::parse("1")).expect("remove");
        assert!(!outcome.changed());
        assert!(!scratch.tasks_path().exists());
    }

    #[test]
    fn toggle_persists_only_real_changes() {
        let (scratch, mut session) = seeded(&[done(1, "a")]);
        std::fs::remove_file(scratch.tasks_path()).expect("remove file");
        let outcome = session
            .toggle(ToggleAction::Mark, &Selection::parse("1"))
            .expect("toggle");
        assert!(!outcome.changed());
        assert!(!scratch.tasks_path().exists());

        session
            .toggle(ToggleAction::Unmark, &Selection::All)
            .expect("toggle");
        assert_eq!(scratch.read_tasks().expect("read"), vec![pending(1, "a")]);
    }

    #[test]
    fn rename_through_validated_position() {
        let (scratch, mut session) = seeded(&[pending(1, "Buy milk"), done(2, "Call mom")]);
        let index = session.resolve_position("1").expect("position");
        session.rename(index, "Buy bread").expect("rename");
        assert_eq!(
            scratch.read_tasks().expect("read"),
            vec![pending(1, "Buy bread"), done(2, "Call mom")]
        );
    }

    #[test]
    fn resolve_position_reports_not_found() {
        let (_scratch, session) = seeded(&numbered(2));
        assert_eq!(
            session.resolve_position("3"),
            Err(TaskError::NotFound {
                position: 3,
                len: 2
            })
        );
    }

    #[test]
    fn list_does_not_mutate() {
        let (_scratch, session) = seeded(&sample_tasks());
        let view = session.list(Filter::All, Some(SortKey::Name));
        assert_eq!(view.len(), 3);
        assert_eq!(session.tasks(), sample_tasks().as_slice());
    }
}
