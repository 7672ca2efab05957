//! Application state and the UI action surface.
//!
//! A [`Session`] owns the directory, the edit-mode gate and the current search
//! query. Views read from it; user actions go through [`Session::dispatch`],
//! which answers with a [`Notice`] for the user.

use tracing::debug;

use crate::directory::Directory;
use crate::employee::{Employee, NewEmployee};
use crate::error::Error;
use crate::gate::EditGate;
use crate::search;
use crate::storage::KeyValueStore;

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An action completed.
    Success(String),
    /// Informational.
    Info(String),
    /// An action was refused.
    Error(String),
}

impl Notice {
    fn success(message: &str) -> Self {
        Self::Success(message.to_string())
    }

    fn not_found(id: &str) -> Self {
        Self::Info(format!("No employee with id {id}"))
    }

    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Info(m) | Self::Error(m) => m,
        }
    }

    /// Whether this notice reports a refusal.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        let message = match err {
            Error::EmptyName => "Name is required".to_string(),
            Error::PhotoTooLarge { max, .. } => {
                format!("Photo must be less than {}", human_size(*max))
            }
            Error::NotAnImage { .. } => "Please upload an image file".to_string(),
            Error::IncorrectPassword => crate::gate::INCORRECT_PASSWORD.to_string(),
            Error::EditLocked => "Unlock edit mode first".to_string(),
            other => other.to_string(),
        };
        Self::Error(message)
    }
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the add-employee form.
    AddEmployee(NewEmployee),
    /// Delete an employee card.
    DeleteEmployee(String),
    /// Save the edit-photo dialog. An empty photo clears it.
    UpdatePhoto {
        /// Employee id.
        id: String,
        /// Data URI, or empty.
        photo: String,
    },
    /// Change the search box, or click a branch filter.
    SetSearchQuery(String),
    /// Click "Edit Directory".
    RequestEditMode,
    /// Submit the password prompt.
    SubmitPassword(String),
    /// Click "Exit Edit Mode".
    ExitEditMode,
}

impl Action {
    fn needs_edit_mode(&self) -> bool {
        matches!(
            self,
            Self::AddEmployee(_) | Self::DeleteEmployee(_) | Self::UpdatePhoto { .. }
        )
    }
}

/// Explicit application state.
#[derive(Debug)]
pub struct Session<S> {
    directory: Directory<S>,
    gate: EditGate,
    query: String,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a locked session over `directory` with an empty query.
    pub fn new(directory: Directory<S>) -> Self {
        Self {
            directory,
            gate: EditGate::new(),
            query: String::new(),
        }
    }

    /// The directory.
    pub fn directory(&self) -> &Directory<S> {
        &self.directory
    }

    /// Mutable access to the directory, bypassing the edit-mode gate.
    pub fn directory_mut(&mut self) -> &mut Directory<S> {
        &mut self.directory
    }

    /// The edit-mode gate.
    #[must_use]
    pub fn gate(&self) -> &EditGate {
        &self.gate
    }

    /// The current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Employees matching the current query.
    #[must_use]
    pub fn visible(&self) -> Vec<&Employee> {
        self.directory.filter(&self.query)
    }

    /// Quick-filter branch names.
    #[must_use]
    pub fn branches(&self) -> Vec<String> {
        self.directory.branches()
    }

    /// The results count line for the current query.
    #[must_use]
    pub fn summary(&self) -> String {
        search::summary(self.visible().len(), self.directory.len())
    }

    /// Apply a user action.
    ///
    /// Editing actions are refused while the gate is locked. Returns `None`
    /// for actions that show no notice (search changes, opening the prompt,
    /// re-submitting the password while already unlocked).
    pub fn dispatch(&mut self, action: Action) -> Option<Notice> {
        debug!("Dispatching {:?}", action);
        if action.needs_edit_mode() && !self.gate.is_unlocked() {
            return Some(Notice::from(&Error::EditLocked));
        }

        match action {
            Action::AddEmployee(new) => Some(match self.directory.add(new) {
                Some(_) => Notice::success("Employee added successfully"),
                None => Notice::from(&Error::EmptyName),
            }),
            Action::DeleteEmployee(id) => Some(if self.directory.remove(&id) {
                Notice::success("Employee removed")
            } else {
                Notice::not_found(&id)
            }),
            Action::UpdatePhoto { id, photo } => {
                Some(if self.directory.update_photo(&id, &photo) {
                    Notice::success("Photo updated")
                } else {
                    Notice::not_found(&id)
                })
            }
            Action::SetSearchQuery(query) => {
                self.query = query;
                None
            }
            Action::RequestEditMode => {
                self.gate.request_unlock();
                None
            }
            Action::SubmitPassword(_) if self.gate.is_unlocked() => None,
            Action::SubmitPassword(password) => {
                if self.gate.submit_password(&password) {
                    Some(Notice::success("Edit mode enabled"))
                } else {
                    Some(Notice::from(&Error::IncorrectPassword))
                }
            }
            Action::ExitEditMode => {
                let was_unlocked = self.gate.is_unlocked();
                self.gate.lock();
                was_unlocked.then(|| Notice::Info("Edit mode disabled".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::EDIT_PASSWORD;
    use crate::persistence::PersistenceAdapter;
    use crate::storage::MemoryStore;

    fn session() -> Session<MemoryStore> {
        let directory = Directory::initialize_with(
            PersistenceAdapter::new(MemoryStore::new()),
            vec![
                NewEmployee {
                    name: "Alice Smith".to_string(),
                    branch: Some("NY".to_string()),
                    ..NewEmployee::default()
                },
                NewEmployee {
                    name: "Bob Lee".to_string(),
                    branch: Some("LA".to_string()),
                    ..NewEmployee::default()
                },
            ],
        );
        Session::new(directory)
    }

    fn unlocked() -> Session<MemoryStore> {
        let mut session = session();
        session.dispatch(Action::RequestEditMode);
        session.dispatch(Action::SubmitPassword(EDIT_PASSWORD.to_string()));
        session
    }

    #[test]
    fn test_edits_refused_while_locked() {
        let mut session = session();

        let notice = session
            .dispatch(Action::DeleteEmployee("emp-0".to_string()))
            .unwrap();
        assert!(notice.is_error());
        assert_eq!(session.directory().len(), 2);

        let notice = session
            .dispatch(Action::AddEmployee(NewEmployee::named("Carl")))
            .unwrap();
        assert!(notice.is_error());
        assert_eq!(session.directory().len(), 2);
    }

    #[test]
    fn test_unlock_flow() {
        let mut session = session();
        assert!(session.dispatch(Action::RequestEditMode).is_none());
        assert!(session.gate().prompt().is_some());

        let notice = session
            .dispatch(Action::SubmitPassword("wrong".to_string()))
            .unwrap();
        assert_eq!(notice, Notice::Error("Incorrect password".to_string()));
        assert!(!session.gate().is_unlocked());

        let notice = session
            .dispatch(Action::SubmitPassword(EDIT_PASSWORD.to_string()))
            .unwrap();
        assert_eq!(notice.message(), "Edit mode enabled");
        assert!(session.gate().is_unlocked());
    }

    #[test]
    fn test_exit_edit_mode() {
        let mut session = unlocked();
        let notice = session.dispatch(Action::ExitEditMode).unwrap();
        assert_eq!(notice, Notice::Info("Edit mode disabled".to_string()));
        assert!(!session.gate().is_unlocked());

        assert!(session.dispatch(Action::ExitEditMode).is_none());
    }

    #[test]
    fn test_add_and_delete_when_unlocked() {
        let mut session = unlocked();

        let notice = session
            .dispatch(Action::AddEmployee(NewEmployee::named("Carl Jones")))
            .unwrap();
        assert_eq!(notice.message(), "Employee added successfully");
        assert_eq!(session.directory().len(), 3);

        let notice = session
            .dispatch(Action::DeleteEmployee("emp-0".to_string()))
            .unwrap();
        assert_eq!(notice.message(), "Employee removed");
        assert_eq!(session.directory().len(), 2);
    }

    #[test]
    fn test_unknown_id_reports_info() {
        let mut session = unlocked();

        let notice = session
            .dispatch(Action::DeleteEmployee("emp-404".to_string()))
            .unwrap();
        assert_eq!(notice, Notice::Info("No employee with id emp-404".to_string()));

        let notice = session
            .dispatch(Action::UpdatePhoto {
                id: "emp-404".to_string(),
                photo: "data:image/png;base64,AAAA".to_string(),
            })
            .unwrap();
        assert_eq!(notice, Notice::Info("No employee with id emp-404".to_string()));
        assert_eq!(session.directory().len(), 2);
    }

    #[test]
    fn test_password_while_unlocked_is_silent() {
        let mut session = unlocked();
        assert!(session
            .dispatch(Action::SubmitPassword(EDIT_PASSWORD.to_string()))
            .is_none());
        assert!(session
            .dispatch(Action::SubmitPassword("wrong".to_string()))
            .is_none());
        assert!(session.gate().is_unlocked());
    }

    #[test]
    fn test_add_blank_name_reports_error() {
        let mut session = unlocked();
        let notice = session
            .dispatch(Action::AddEmployee(NewEmployee::named("  ")))
            .unwrap();
        assert!(notice.is_error());
        assert_eq!(session.directory().len(), 2);
    }

    #[test]
    fn test_update_photo() {
        let mut session = unlocked();
        let notice = session
            .dispatch(Action::UpdatePhoto {
                id: "emp-1".to_string(),
                photo: "data:image/png;base64,AAAA".to_string(),
            })
            .unwrap();
        assert_eq!(notice.message(), "Photo updated");
        assert!(session.directory().get("emp-1").unwrap().has_photo());
    }

    #[test]
    fn test_search_query_and_summary() {
        let mut session = session();
        assert_eq!(session.summary(), "Showing 2 of 2 employees");

        assert!(session
            .dispatch(Action::SetSearchQuery("ny".to_string()))
            .is_none());
        assert_eq!(session.query(), "ny");
        assert_eq!(session.visible().len(), 1);
        assert_eq!(session.summary(), "Showing 1 of 2 employees");
    }

    #[test]
    fn test_branch_quick_filter() {
        let mut session = session();
        let branches = session.branches();
        assert_eq!(branches, vec!["LA", "NY"]);

        session.dispatch(Action::SetSearchQuery(branches[0].clone()));
        assert_eq!(session.visible()[0].name, "Bob Lee");
    }

    #[test]
    fn test_notice_from_validation_errors() {
        assert_eq!(
            Notice::from(&Error::photo_too_large(3 * 1024 * 1024, 2 * 1024 * 1024)).message(),
            "Photo must be less than 2MB"
        );
        assert_eq!(
            Notice::from(&Error::photo_too_large(3, 2)).message(),
            "Photo must be less than 2 bytes"
        );
        assert_eq!(
            Notice::from(&Error::not_an_image("text/plain")).message(),
            "Please upload an image file"
        );
    }
}
