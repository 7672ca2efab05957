//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::employee::NewEmployee;

/// Password for commands that change the directory.
#[derive(Debug, Clone, Args)]
pub struct EditAuth {
    /// Edit-mode password
    #[arg(short, long)]
    pub password: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by name, email, job title, branch or phone
    pub query: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Employee id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Job title
    #[arg(long)]
    pub job_title: Option<String>,

    /// Branch or office
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Work telephone
    #[arg(short, long)]
    pub telephone: Option<String>,

    /// Telephone extension
    #[arg(long)]
    pub ext: Option<String>,

    /// Fax number
    #[arg(long)]
    pub fax: Option<String>,

    /// Cell phone
    #[arg(long)]
    pub cell_phone: Option<String>,

    /// Home phone
    #[arg(long)]
    pub home_phone: Option<String>,

    /// Photo file to embed
    #[arg(long, value_name = "FILE")]
    pub photo: Option<PathBuf>,

    #[command(flatten)]
    pub auth: EditAuth,
}

impl AddCommand {
    /// The form fields, without the photo.
    #[must_use]
    pub fn to_new_employee(&self) -> NewEmployee {
        NewEmployee {
            name: self.name.clone(),
            telephone: self.telephone.clone(),
            ext: self.ext.clone(),
            fax: self.fax.clone(),
            email: self.email.clone(),
            cell_phone: self.cell_phone.clone(),
            home_phone: self.home_phone.clone(),
            job_title: self.job_title.clone(),
            branch: self.branch.clone(),
            photo: None,
        }
    }
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Employee id
    pub id: String,

    #[command(flatten)]
    pub auth: EditAuth,
}

/// Photo commands.
#[derive(Debug, Subcommand)]
pub enum PhotoCommand {
    /// Upload a photo for an employee
    Set {
        /// Employee id
        id: String,

        /// Image file (max 2MB by default)
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        auth: EditAuth,
    },

    /// Remove an employee's photo
    Clear {
        /// Employee id
        id: String,

        #[command(flatten)]
        auth: EditAuth,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
