//! `corpdir` - A searchable company directory
//!
//! This library provides the employee collection, search, edit-mode gate and
//! local persistence behind the `corpdir` command-line front end.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod directory;
pub mod employee;
pub mod error;
pub mod gate;
pub mod logging;
pub mod persistence;
pub mod photo;
pub mod search;
pub mod seed;
pub mod session;
pub mod storage;

pub use config::Config;
pub use directory::Directory;
pub use employee::{Employee, NewEmployee, PhoneLine};
pub use error::{Error, Result};
pub use gate::{EditGate, EditMode};
pub use logging::init_logging;
pub use persistence::PersistenceAdapter;
pub use photo::PhotoDraft;
pub use session::{Action, Notice, Session};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
