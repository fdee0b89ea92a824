//! User-facing text for operation outcomes, shared by the menu and the
//! one-shot subcommands.

use std::io::Write;

use anyhow::Result;

use crate::core::error::TaskError;
use crate::core::operations::{RemoveOutcome, Renamed, ToggleOutcome};
use crate::core::types::ToggleAction;
use crate::core::view::ListedTask;
use crate::task::Task;

pub const NO_TASKS: &str = "No tasks to show for the selected filter.";

pub fn write_view(out: &mut impl Write, view: &[ListedTask<'_>]) -> Result<()> {
    if view.is_empty() {
        writeln!(out, "{}", NO_TASKS)?;
        return Ok(());
    }
    writeln!(out, "\n--- Task List ---")?;
    for row in view {
        writeln!(out, "{}", row)?;
    }
    writeln!(out, "-----------------\n")?;
    Ok(())
}

pub fn write_error(out: &mut impl Write, err: &TaskError) -> Result<()> {
    writeln!(out, "{}", capitalize(&err.to_string()))?;
    Ok(())
}

pub fn write_added(out: &mut impl Write, task: &Task) -> Result<()> {
    writeln!(out, "Task '{}' added.", task.name)?;
    Ok(())
}

pub fn write_removed(out: &mut impl Write, outcome: &RemoveOutcome) -> Result<()> {
    for err in &outcome.rejected {
        write_error(out, err)?;
    }
    if outcome.changed() {
        writeln!(out, "Removed: {}", join_names(&outcome.removed))?;
    } else {
        writeln!(out, "Nothing was removed.")?;
    }
    Ok(())
}

pub fn write_toggled(out: &mut impl Write, outcome: &ToggleOutcome) -> Result<()> {
    for err in &outcome.rejected {
        write_error(out, err)?;
    }
    let verb = match outcome.action {
        ToggleAction::Mark => "completed",
        ToggleAction::Unmark => "pending",
    };
    if !outcome.unchanged.is_empty() {
        writeln!(out, "Already {}: {}", verb, join_names(&outcome.unchanged))?;
    }
    if outcome.changed() {
        writeln!(out, "Marked as {}: {}", verb, join_names(&outcome.changed))?;
    } else {
        writeln!(out, "Nothing changed.")?;
    }
    Ok(())
}

pub fn write_renamed(out: &mut impl Write, renamed: &Renamed) -> Result<()> {
    writeln!(
        out,
        "Task '{}' renamed to '{}'.",
        renamed.previous, renamed.task.name
    )?;
    Ok(())
}

fn join_names(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| task.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
