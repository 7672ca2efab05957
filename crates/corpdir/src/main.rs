//! `corpdir` - CLI for the company directory
//!
//! This binary renders employee cards and applies edits through the same
//! session actions a graphical front end would use.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use corpdir::cli::{Cli, Command, ConfigCommand, EditAuth, ListCommand, PhotoCommand};
use corpdir::logging::Verbosity;
use corpdir::{
    init_logging, photo, search, Action, Config, Directory, Employee, Notice, PersistenceAdapter,
    Session, SqliteStore,
};

type AppSession = Session<SqliteStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbosity = cli.verbosity();
    init_logging(verbosity);
    let out = Output {
        quiet: verbosity == Verbosity::Quiet,
    };

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::List(list_cmd) => handle_list(&mut open_session(&config)?, list_cmd),
        Command::Branches => {
            for branch in open_session(&config)?.branches() {
                println!("{branch}");
            }
            Ok(())
        }
        Command::Show(show_cmd) => {
            let session = open_session(&config)?;
            let Some(employee) = session.directory().get(&show_cmd.id) else {
                bail!("no employee with id {}", show_cmd.id);
            };
            if show_cmd.json {
                println!("{}", serde_json::to_string_pretty(employee)?);
            } else {
                print_card(employee);
            }
            Ok(())
        }
        Command::Add(add_cmd) => {
            let mut new = add_cmd.to_new_employee();
            if let Some(path) = &add_cmd.photo {
                new.photo = Some(read_photo(&config, path).await?);
            }
            let mut session = open_session(&config)?;
            unlock(out, &mut session, &add_cmd.auth)?;
            out.report(session.dispatch(Action::AddEmployee(new)))?;
            if let Some(employee) = session.directory().employees().last() {
                println!("{}", employee.id);
            }
            Ok(())
        }
        Command::Remove(remove_cmd) => {
            let mut session = open_session(&config)?;
            unlock(out, &mut session, &remove_cmd.auth)?;
            out.report(session.dispatch(Action::DeleteEmployee(remove_cmd.id)))
        }
        Command::Photo(photo_cmd) => handle_photo(out, &config, photo_cmd).await,
        Command::Reset { yes } => {
            if yes {
                let mut session = open_session(&config)?;
                session.directory_mut().persistence_mut().clear()?;
                println!("Stored directory removed. Defaults will be seeded on next run.");
            } else {
                println!("This will delete every stored employee and restore the defaults.");
                println!("Use --yes to confirm.");
            }
            Ok(())
        }
    }
}

fn open_session(config: &Config) -> anyhow::Result<AppSession> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening directory storage at {}", path.display()))?
        .with_quota(config.quota());
    let persistence = PersistenceAdapter::with_key(store, config.storage.key.clone());
    Ok(Session::new(Directory::initialize(persistence)))
}

/// Where user notices go.
#[derive(Debug, Clone, Copy)]
struct Output {
    quiet: bool,
}

impl Output {
    /// Print a notice, turning refusals into errors. Only refusals are
    /// shown in quiet mode.
    fn report(self, notice: Option<Notice>) -> anyhow::Result<()> {
        match notice {
            Some(Notice::Error(message)) => bail!(message),
            Some(notice) => {
                if self.shows(&notice) {
                    eprintln!("{}", notice.message());
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn shows(self, notice: &Notice) -> bool {
        notice.is_error() || !self.quiet
    }
}

/// Unlock edit mode, failing on a wrong password.
fn unlock(out: Output, session: &mut AppSession, auth: &EditAuth) -> anyhow::Result<()> {
    session.dispatch(Action::RequestEditMode);
    out.report(session.dispatch(Action::SubmitPassword(auth.password.clone())))
}

async fn read_photo(config: &Config, path: &std::path::Path) -> anyhow::Result<String> {
    match photo::read_photo(path, config.photo.max_size_bytes).await {
        Ok(uri) => Ok(uri),
        Err(err) if err.is_validation() => bail!(Notice::from(&err).message().to_string()),
        Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
    }
}

fn handle_list(session: &mut AppSession, cmd: ListCommand) -> anyhow::Result<()> {
    session.dispatch(Action::SetSearchQuery(cmd.query.unwrap_or_default()));
    let visible = session.visible();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for employee in &visible {
        print_card(employee);
        println!();
    }

    if visible.is_empty() {
        println!("{}", search::no_results_message(session.query()));
    }
    println!("{}", session.summary());
    Ok(())
}

fn print_card(employee: &Employee) {
    println!("{}  [{}]", employee.name, employee.id);
    if let Some(title) = employee.job_title() {
        println!("  {title}");
    }
    if let Some(branch) = employee.branch() {
        println!("  Branch:  {branch}");
    }
    if let Some(email) = employee.email() {
        println!("  Email:   {email}");
    }
    for line in employee.phone_lines() {
        println!("  Phone:   {line}");
    }
    if employee.has_photo() {
        println!("  Photo:   yes");
    }
}

async fn handle_photo(out: Output, config: &Config, cmd: PhotoCommand) -> anyhow::Result<()> {
    let (id, photo, auth) = match cmd {
        PhotoCommand::Set { id, path, auth } => {
            let uri = read_photo(config, &path).await?;
            (id, uri, auth)
        }
        PhotoCommand::Clear { id, auth } => (id, String::new(), auth),
    };

    let mut session = open_session(config)?;
    unlock(out, &mut session, &auth)?;
    if session.directory().get(&id).is_none() {
        bail!("no employee with id {id}");
    }
    out.report(session.dispatch(Action::UpdatePhoto { id, photo }))
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                match config.quota() {
                    Some(quota) => println!("  Quota (bytes):      {quota}"),
                    None => println!("  Quota (bytes):      unlimited"),
                }
                println!();
                println!("[Photo]");
                println!("  Max size (bytes):   {}", config.photo.max_size_bytes);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
