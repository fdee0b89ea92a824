//! Interactive numbered menu.
//!
//! Reads one line per prompt from any `BufRead` and writes to any `Write`, so
//! the loop can be scripted in tests. End of input behaves like choosing exit.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::error::TaskError;
use crate::core::selection::Selection;
use crate::core::types::{Filter, SortKey, ToggleAction};
use crate::report;
use crate::session::{AddOutcome, RenameOutcome, Session, log_rejection};

const MENU: &str = "\n--- Task Manager ---
1. List tasks (all, pending or completed)
2. Add task
3. Remove task(s)
4. Mark or unmark tasks as completed
5. Edit task
6. Sort tasks by name
7. Sort tasks by status
8. Sort tasks by entry order
9. Exit";

/// A single menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Add,
    Remove,
    Toggle,
    Edit,
    Sort(SortKey),
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, TaskError> {
        match input.trim() {
            "1" => Ok(MenuChoice::List),
            "2" => Ok(MenuChoice::Add),
            "3" => Ok(MenuChoice::Remove),
            "4" => Ok(MenuChoice::Toggle),
            "5" => Ok(MenuChoice::Edit),
            "6" => Ok(MenuChoice::Sort(SortKey::Name)),
            "7" => Ok(MenuChoice::Sort(SortKey::Status)),
            "8" => Ok(MenuChoice::Sort(SortKey::Entry)),
            "9" => Ok(MenuChoice::Exit),
            other => Err(TaskError::InvalidChoice {
                input: other.to_string(),
                expected: "1-9",
            }),
        }
    }
}

/// Signals whether the loop should keep going.
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'s, R, W> {
    session: &'s mut Session,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(session: &'s mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        info!("menu started");
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };
            let flow = match MenuChoice::parse(&line) {
                Ok(choice) => {
                    debug!(?choice, "menu choice");
                    self.dispatch(choice)?
                }
                Err(err) => {
                    log_rejection("menu", &err);
                    report::write_error(&mut self.output, &err)?;
                    Flow::Continue
                }
            };
            if matches!(flow, Flow::Exit) {
                break;
            }
        }
        writeln!(self.output, "Goodbye!")?;
        info!("menu exited");
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::List => self.list(),
            MenuChoice::Add => self.add(),
            MenuChoice::Remove => self.remove(),
            MenuChoice::Toggle => self.toggle(),
            MenuChoice::Edit => self.edit(),
            MenuChoice::Sort(key) => {
                self.show(Filter::All, Some(key))?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    /// Re-prompts until a valid filter is entered.
    fn list(&mut self) -> Result<Flow> {
        loop {
            let Some(line) = self.prompt("Apply a filter? (all, pending, completed): ")? else {
                return Ok(Flow::Exit);
            };
            match line.parse::<Filter>() {
                Ok(filter) => {
                    self.show(filter, None)?;
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    log_rejection("list", &err);
                    report::write_error(&mut self.output, &err)?;
                }
            }
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("New task name: ")? else {
            return Ok(Flow::Exit);
        };
        match self.session.add(&name)? {
            AddOutcome::Added(task) => report::write_added(&mut self.output, &task)?,
            AddOutcome::Rejected(err) => report::write_error(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> Result<Flow> {
        self.show(Filter::All, None)?;
        writeln!(
            self.output,
            "Enter task numbers separated by commas (e.g. 1,2,3) or 'all'."
        )?;
        let Some(line) = self.prompt("Task(s) to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let outcome = self.session.remove(&Selection::parse(&line))?;
        report::write_removed(&mut self.output, &outcome)?;
        Ok(Flow::Continue)
    }

    fn toggle(&mut self) -> Result<Flow> {
        self.show(Filter::All, None)?;
        let Some(line) = self.prompt("Do you want to 'mark' or 'unmark' tasks as completed? ")?
        else {
            return Ok(Flow::Exit);
        };
        let action = match line.parse::<ToggleAction>() {
            Ok(action) => action,
            Err(err) => {
                log_rejection("toggle", &err);
                report::write_error(&mut self.output, &err)?;
                return Ok(Flow::Continue);
            }
        };
        writeln!(
            self.output,
            "Enter task numbers separated by commas (e.g. 1,2,3) or 'all'."
        )?;
        let Some(line) = self.prompt("Task(s) to change: ")? else {
            return Ok(Flow::Exit);
        };
        let outcome = self.session.toggle(action, &Selection::parse(&line))?;
        report::write_toggled(&mut self.output, &outcome)?;
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        self.show(Filter::All, None)?;
        let Some(line) = self.prompt("Task number to edit: ")? else {
            return Ok(Flow::Exit);
        };
        let index = match self.session.resolve_position(&line) {
            Ok(index) => index,
            Err(err) => {
                report::write_error(&mut self.output, &err)?;
                return Ok(Flow::Continue);
            }
        };
        let current = self.session.tasks()[index].name.clone();
        let Some(name) = self.prompt(&format!("New name for '{}': ", current))? else {
            return Ok(Flow::Exit);
        };
        match self.session.rename(index, &name)? {
            RenameOutcome::Renamed(renamed) => report::write_renamed(&mut self.output, &renamed)?,
            RenameOutcome::Rejected(err) => report::write_error(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self, filter: Filter, sort: Option<SortKey>) -> Result<()> {
        let view = self.session.list(filter, sort);
        report::write_view(&mut self.output, &view)
    }

    /// Print `text` and read one line. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
    /// failing the session.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush().context("flush prompt")?;
        let mut buf = Vec::new();
        let read = self.input.read_until(b'\n', &mut buf).context("read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
