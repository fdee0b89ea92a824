//! Personal task-list manager.
//!
//! Without a subcommand, runs the interactive menu against the task file
//! (`tasks.json` by default, see `listflow.toml`). Subcommands run a single
//! operation and exit.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use listflow::core::selection::Selection;
use listflow::core::types::{Filter, SortKey, ToggleAction};
use listflow::exit_codes;
use listflow::io::config::{DEFAULT_CONFIG_FILE, ListflowConfig, load_config};
use listflow::io::task_store::TaskStore;
use listflow::logging;
use listflow::menu::Menu;
use listflow::report;
use listflow::session::{AddOutcome, RenameOutcome, Session, log_rejection};

#[derive(Parser)]
#[command(name = "listflow", version, about = "Personal task-list manager")]
struct Cli {
    /// Config file (defaults to `listflow.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Task list file, overriding `tasks_file` from the config.
    #[arg(long, global = true)]
    tasks_file: Option<PathBuf>,

    /// Diagnostic log file, overriding `log.file` from the config.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Interactive numbered menu (default).
    Menu,
    /// Print the task list.
    List {
        /// all, pending or completed.
        #[arg(long, default_value = "all")]
        filter: String,
        /// name, status or entry.
        #[arg(long)]
        sort: Option<String>,
    },
    /// Add a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove tasks by position (`1,3`) or `all`.
    Remove { selection: String },
    /// Mark or unmark tasks by position (`1,3`) or `all`.
    Toggle { action: String, selection: String },
    /// Rename the task at a position.
    Edit {
        position: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::STORAGE_FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init(&config.log)?;

    let mut session = Session::open(TaskStore::new(config.store_config()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(&mut session, stdin.lock(), &mut out).run()?;
        }
        Command::List { filter, sort } => cmd_list(&session, &filter, sort.as_deref(), &mut out)?,
        Command::Add { name } => cmd_add(&mut session, &name.join(" "), &mut out)?,
        Command::Remove { selection } => {
            let outcome = session.remove(&Selection::parse(&selection))?;
            report::write_removed(&mut out, &outcome)?;
        }
        Command::Toggle { action, selection } => {
            cmd_toggle(&mut session, &action, &selection, &mut out)?;
        }
        Command::Edit { position, name } => {
            cmd_edit(&mut session, &position, &name.join(" "), &mut out)?;
        }
    }
    out.flush().context("flush stdout")?;
    Ok(())
}

/// Load the config file and apply command-line overrides.
///
/// An explicit `--config` must exist; the default file is optional.
fn resolve_config(cli: &Cli) -> Result<ListflowConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("config file not found: {}", path.display()));
            }
            load_config(path)?
        }
        None => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    if let Some(path) = &cli.tasks_file {
        config.tasks_file = path.clone();
    }
    if let Some(path) = &cli.log_file {
        config.log.file = path.clone();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_list(
    session: &Session,
    filter: &str,
    sort: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let filter = match filter.parse::<Filter>() {
        Ok(filter) => filter,
        Err(err) => {
            log_rejection("list", &err);
            return report::write_error(out, &err);
        }
    };
    let sort = match sort.map(str::parse::<SortKey>).transpose() {
        Ok(sort) => sort,
        Err(err) => {
            log_rejection("list", &err);
            return report::write_error(out, &err);
        }
    };
    report::write_view(out, &session.list(filter, sort))
}

fn cmd_add(session: &mut Session, name: &str, out: &mut impl Write) -> Result<()> {
    match session.add(name)? {
        AddOutcome::Added(task) => report::write_added(out, &task),
        AddOutcome::Rejected(err) => report::write_error(out, &err),
    }
}

fn cmd_toggle(
    session: &mut Session,
    action: &str,
    selection: &str,
    out: &mut impl Write,
) -> Result<()> {
    let action = match action.parse::<ToggleAction>() {
        Ok(action) => action,
        Err(err) => {
            log_rejection("toggle", &err);
            return report::write_error(out, &err);
        }
    };
    let outcome = session.toggle(action, &Selection::parse(selection))?;
    report::write_toggled(out, &outcome)
}

fn cmd_edit(session: &mut Session, position: &str, name: &str, out: &mut impl Write) -> Result<()> {
    let index = match session.resolve_position(position) {
        Ok(index) => index,
        Err(err) => return report::write_error(out, &err),
    };
    match session.rename(index, name)? {
        RenameOutcome::Renamed(renamed) => report::write_renamed(out, &renamed),
        RenameOutcome::Rejected(err) => report::write_error(out, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_subcommand_defaults_to_menu() {
        let cli = Cli::parse_from(["listflow"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_list_with_options() {
        let cli = Cli::parse_from(["listflow", "list", "--filter", "pending", "--sort", "name"]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                filter: "pending".to_string(),
                sort: Some("name".to_string()),
            })
        );
    }

    #[test]
    fn parse_add_joins_words() {
        let cli = Cli::parse_from(["listflow", "add", "Buy", "milk"]);
        assert_eq!(
            cli.command,
            Some(Command::Add {
                name: vec!["Buy".to_string(), "milk".to_string()],
            })
        );
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::parse_from(["listflow", "remove", "1,2", "--tasks-file", "t.json"]);
        assert_eq!(cli.tasks_file, Some(PathBuf::from("t.json")));
        assert_eq!(
            cli.command,
            Some(Command::Remove {
                selection: "1,2".to_string(),
            })
        );
    }

    #[test]
    fn overrides_replace_config_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cli = Cli::parse_from([
            "listflow".to_string(),
            "--config".to_string(),
            temp.path().join("missing.toml").display().to_string(),
        ]);
        assert!(resolve_config(&cli).is_err());

        let cli = Cli::parse_from(["listflow", "--tasks-file", "a.json", "--log-file", "a.log"]);
        let config = resolve_config(&cli).expect("config");
        assert_eq!(config.tasks_file, PathBuf::from("a.json"));
        assert_eq!(config.log.file, PathBuf::from("a.log"));
    }
}
