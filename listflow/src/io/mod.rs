//! I/O helpers: configuration, the task file, and the diagnostic log file.

pub mod config;
pub mod log_file;
pub mod task_store;
