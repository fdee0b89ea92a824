//! Keyword types parsed from user input.
//!
//! Parsing trims and lowercases the input. Portuguese keywords (`todas`,
//! `pendente`, `marcar`, ...) are accepted as aliases.

use std::fmt;
use std::str::FromStr;

use super::error::TaskError;

/// Which tasks a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !completed,
            Filter::Completed => completed,
        }
    }
}

impl FromStr for Filter {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match normalize(input).as_str() {
            "all" | "todas" => Ok(Filter::All),
            "pending" | "pendente" => Ok(Filter::Pending),
            "completed" | "concluida" | "concluída" => Ok(Filter::Completed),
            _ => Err(invalid(input, "all, pending, completed")),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        })
    }
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive name, ascending.
    Name,
    /// Pending before completed.
    Status,
    /// Ascending id, i.e. entry order.
    Entry,
}

impl FromStr for SortKey {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match normalize(input).as_str() {
            "name" | "nome" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            "entry" | "entrada" => Ok(SortKey::Entry),
            _ => Err(invalid(input, "name, status, entry")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Status => "status",
            SortKey::Entry => "entry",
        })
    }
}

/// Target state for a toggle batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Mark,
    Unmark,
}

impl ToggleAction {
    /// Value `completed` takes after the action.
    pub fn completed(self) -> bool {
        matches!(self, ToggleAction::Mark)
    }
}

impl FromStr for ToggleAction {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match normalize(input).as_str() {
            "mark" | "marcar" => Ok(ToggleAction::Mark),
            "unmark" | "desmarcar" => Ok(ToggleAction::Unmark),
            _ => Err(invalid(input, "mark, unmark")),
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToggleAction::Mark => "mark",
            ToggleAction::Unmark => "unmark",
        })
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

fn invalid(input: &str, expected: &'static str) -> TaskError {
    TaskError::InvalidChoice {
        input: input.trim().to_string(),
        expected,
    }
}
