//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tidybook_core` linkage and print collection summaries.
//! - Keep output deterministic for quick local sanity checks.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tidybook_core::{ContactService, StoreConfig, TaskQuery, TaskService};

/// Prints the core version and, given a data directory, store summaries.
#[derive(Debug, Parser)]
#[command(name = "tidybook_cli", version, about = "tidybook store smoke check")]
struct Cli {
    /// Directory holding contacts.json and todos.json; created when absent.
    data_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("tidybook_core version={}", tidybook_core::core_version());

    let Some(data_dir) = cli.data_dir else {
        return ExitCode::SUCCESS;
    };
    summarize(&StoreConfig::new(data_dir))
}

fn summarize(config: &StoreConfig) -> ExitCode {
    let contacts = match ContactService::open(config) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("contacts: {err}");
            return ExitCode::FAILURE;
        }
    };
    let tasks = match TaskService::open(config) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("tasks: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "contacts path={} count={}",
        config.contacts_path().display(),
        contacts.contacts().len()
    );
    let stats = tasks.stats(&TaskQuery::default());
    println!(
        "tasks path={} total={} completed={} pending={}",
        config.tasks_path().display(),
        stats.total,
        stats.completed,
        stats.pending
    );
    for path in [contacts.store().recovered_from(), tasks.store().recovered_from()]
        .into_iter()
        .flatten()
    {
        println!("recovered unreadable file to {}", path.display());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_is_optional() {
        let cli = Cli::try_parse_from(["tidybook_cli"]).unwrap();
        assert_eq!(cli.data_dir, None);

        let cli = Cli::try_parse_from(["tidybook_cli", "/tmp/book"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/book")));
    }

    #[test]
    fn help_and_version_are_flags_not_directories() {
        let help = Cli::try_parse_from(["tidybook_cli", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from(["tidybook_cli", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let err = Cli::try_parse_from(["tidybook_cli", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Cli::try_parse_from(["tidybook_cli", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
