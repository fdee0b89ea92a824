//! Deterministic, pure task-list logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! collections and return outcomes describing what changed, so the caller
//! decides whether to persist.

pub mod error;
pub mod operations;
pub mod selection;
pub mod types;
pub mod view;
