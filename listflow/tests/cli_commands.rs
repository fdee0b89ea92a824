//! CLI tests for the one-shot subcommands.
//!
//! Spawns the listflow binary in a scratch directory and checks stdout, the
//! exit code, and the task file left behind.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use listflow::exit_codes;
use listflow::test_support::{TestStore, done, pending, sample_tasks};

fn listflow(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_listflow"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run listflow")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8")
}

#[test]
fn add_creates_task_file_with_defaults() {
    let scratch = TestStore::new().expect("store");
    let output = listflow(scratch.path(), &["add", "Buy", "milk"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "Task 'Buy milk' added.\n");
    assert_eq!(scratch.read_tasks().expect("read"), vec![pending(1, "Buy milk")]);
    assert!(scratch.path().join("listflow.log").exists());
}

#[test]
fn list_applies_filter_and_sort() {
    let scratch = TestStore::new().expect("store");
    scratch
        .write_tasks(&[pending(1, "zeta"), done(2, "Alpha"), pending(3, "beta")])
        .expect("seed");
    let output = listflow(scratch.path(), &["list", "--filter", "pending", "--sort", "name"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout(&output),
        "\n--- Task List ---\n1. beta - Pending\n2. zeta - Pending\n-----------------\n\n"
    );
}

#[test]
fn rejected_input_still_exits_ok_without_writing() {
    let scratch = TestStore::new().expect("store");
    scratch.write_tasks(&sample_tasks()).expect("seed");
    let before = fs::read_to_string(scratch.tasks_path()).expect("read");

    let output = listflow(scratch.path(), &["remove", "9,x"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout(&output).contains("Nothing was removed."));

    let output = listflow(scratch.path(), &["toggle", "flip", "all"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    assert_eq!(fs::read_to_string(scratch.tasks_path()).expect("read"), before);
}

#[test]
fn toggle_and_edit_update_file() {
    let scratch = TestStore::new().expect("store");
    scratch
        .write_tasks(&[pending(1, "Buy milk"), pending(2, "Call mom")])
        .expect("seed");

    listflow(scratch.path(), &["toggle", "mark", "2"]);
    listflow(scratch.path(), &["edit", "1", "Buy", "bread"]);

    assert_eq!(
        scratch.read_tasks().expect("read"),
        vec![pending(1, "Buy bread"), done(2, "Call mom")]
    );
}

#[test]
fn config_file_and_flag_overrides() {
    let scratch = TestStore::new().expect("store");
    fs::write(
        scratch.path().join("listflow.toml"),
        "tasks_file = \"data/mine.json\"\n[log]\nfile = \"logs/app.log\"\n",
    )
    .expect("write config");

    listflow(scratch.path(), &["add", "from config"]);
    assert!(scratch.path().join("data/mine.json").exists());
    assert!(scratch.path().join("logs/app.log").exists());

    listflow(scratch.path(), &["add", "from flag", "--tasks-file", "other.json"]);
    assert!(scratch.path().join("other.json").exists());
}

#[test]
fn corrupt_task_file_is_a_storage_failure() {
    let scratch = TestStore::new().expect("store");
    fs::write(scratch.tasks_path(), "not json").expect("write");
    let output = listflow(scratch.path(), &["list"]);

    assert_eq!(output.status.code(), Some(exit_codes::STORAGE_FAILURE));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load task list"));
}
