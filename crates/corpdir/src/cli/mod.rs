//! Command-line interface for corpdir.
//!
//! This module provides the CLI structure for the `corpdir` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, EditAuth, ListCommand, PhotoCommand, RemoveCommand, ShowCommand,
};

/// corpdir - Company directory
///
/// Browse and search employee cards. Adding, removing and changing photos
/// requires the edit-mode password.
#[derive(Debug, Parser)]
#[command(name = "corpdir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employee cards, optionally filtered
    List(ListCommand),

    /// List branch names for quick filtering
    Branches,

    /// Show one employee
    Show(ShowCommand),

    /// Add an employee
    Add(AddCommand),

    /// Remove an employee
    Remove(RemoveCommand),

    /// Change or clear an employee photo
    #[command(subcommand)]
    Photo(PhotoCommand),

    /// Delete the stored directory so the defaults are seeded again
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Branches,
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "corpdir");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_list_with_query() {
        let cli = Cli::try_parse_from(["corpdir", "list", "ny"]).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.query.as_deref(), Some("ny")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_without_query() {
        let cli = Cli::try_parse_from(["corpdir", "list", "--json"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert!(cmd.query.is_none());
                assert!(cmd.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add() {
        let args = [
            "corpdir", "add", "--name", "Carl Jones", "--branch", "NY", "--cell-phone",
            "555-0102", "--password", "admin123",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.name, "Carl Jones");
                assert_eq!(cmd.cell_phone.as_deref(), Some("555-0102"));
                assert_eq!(cmd.auth.password, "admin123");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_requires_password() {
        assert!(Cli::try_parse_from(["corpdir", "add", "--name", "X"]).is_err());
    }

    #[test]
    fn test_parse_photo_set() {
        let args = ["corpdir", "photo", "set", "emp-0", "me.png", "-p", "admin123"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Photo(PhotoCommand::Set { .. })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["corpdir", "-c", "/custom/config.toml", "branches"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
