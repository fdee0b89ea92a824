//! Recoverable input errors raised by task operations.
//!
//! None of these are fatal. Batch operations collect them per token and keep
//! going; single-target operations abort without touching the collection.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// Task names must contain something other than whitespace.
    #[error("task name cannot be empty")]
    EmptyName,

    /// Unknown keyword for a menu, filter, sort, or toggle prompt.
    #[error("invalid option '{input}': expected one of {expected}")]
    InvalidChoice {
        input: String,
        expected: &'static str,
    },

    /// Position outside `1..=len` of the current collection.
    #[error("invalid task number: {position} (list has {len} tasks)")]
    NotFound { position: i64, len: usize },

    /// Token that is not an integer.
    #[error("invalid entry: '{token}' is not a number")]
    NotANumber { token: String },
}

impl TaskError {
    /// Short classification used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::EmptyName | TaskError::InvalidChoice { .. } => "validation",
            TaskError::NotFound { .. } => "not_found",
            TaskError::NotANumber { .. } => "parse",
        }
    }
}
