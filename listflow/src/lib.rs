//! Personal task-list manager driven by a text menu.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic task-list logic (listing, add, remove,
//!   toggle, rename). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config file, task file, log file).
//!
//! [`session`] couples the two into the read-modify-persist loop used by the
//! interactive [`menu`] and the one-shot CLI subcommands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod report;
pub mod session;
pub mod task;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
