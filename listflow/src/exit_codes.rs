//! Stable exit codes for the listflow CLI.

/// Command finished, including commands whose input was rejected.
pub const OK: i32 = 0;
/// Configuration, log, or task file could not be read or written.
pub const STORAGE_FAILURE: i32 = 1;
