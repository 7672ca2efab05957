//! Directory snapshot persistence.
//!
//! The whole collection is stored as one JSON array under a single key.
//! Loading fails open: anything unreadable is treated as "nothing stored".
//! Saving never fails the caller; errors are logged and the in-memory state
//! stays authoritative.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::employee::Employee;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Loads and saves the employee collection through a [`KeyValueStore`].
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Create an adapter using the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create an adapter storing the snapshot under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored collection.
    ///
    /// Returns `None` when nothing is stored yet, when the backend cannot be
    /// read, when the value is not a JSON array of employees, or when the
    /// records break the directory invariants (blank name, duplicate id).
    pub fn load(&self) -> Option<Vec<Employee>> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored directory under '{}'", self.key);
                return None;
            }
            Err(err) => {
                warn!("Failed to read stored directory: {err}");
                return None;
            }
        };

        let employees: Vec<Employee> = match serde_json::from_str(&raw) {
            Ok(employees) => employees,
            Err(err) => {
                warn!("Stored directory is unreadable, ignoring it: {err}");
                return None;
            }
        };

        let mut seen = HashSet::new();
        for employee in &employees {
            if employee.name.trim().is_empty() {
                warn!("Stored employee {} has no name, ignoring stored directory", employee.id);
                return None;
            }
            if !seen.insert(employee.id.as_str()) {
                warn!("Stored directory repeats id {}, ignoring it", employee.id);
                return None;
            }
        }

        debug!("Loaded {} employees from '{}'", employees.len(), self.key);
        Some(employees)
    }

    /// Write the collection, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn try_save(&mut self, employees: &[Employee]) -> Result<()> {
        let raw = serde_json::to_string(employees)?;
        self.store.set_item(&self.key, &raw)?;
        debug!("Saved {} employees to '{}'", employees.len(), self.key);
        Ok(())
    }

    /// Write the collection. Failures are logged and otherwise ignored.
    ///
    /// Returns `true` if the snapshot was written.
    pub fn save(&mut self, employees: &[Employee]) -> bool {
        match self.try_save(employees) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to persist directory, keeping in-memory state: {err}");
                false
            }
        }
    }

    /// Remove the stored snapshot so the next load starts fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(&mut self) -> Result<bool> {
        self.store.remove_item(&self.key)
    }
}
