//! Edit-mode gate.
//!
//! A soft UI lock: editing controls are hidden until a shared password is
//! entered. The password ships with the client, so anyone reading the code can
//! find it. This keeps casual visitors out of edit mode; it is not access
//! control.

use tracing::{debug, info};

/// The shared edit-mode password.
pub const EDIT_PASSWORD: &str = "admin123";

/// Error text shown after a wrong password.
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Whether editing is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Read-only browsing.
    #[default]
    Locked,
    /// Add, delete and photo edits are enabled.
    Unlocked,
}

/// State of the open password prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordPrompt {
    input: String,
    error: Option<&'static str>,
}

impl PasswordPrompt {
    /// The text typed so far.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The error from the last failed attempt, cleared on typing.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}

/// Two-state gate with an optional password prompt while locked.
#[derive(Debug, Clone, Default)]
pub struct EditGate {
    mode: EditMode,
    prompt: Option<PasswordPrompt>,
}

impl EditGate {
    /// A locked gate with no prompt open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether edits are allowed.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.mode == EditMode::Unlocked
    }

    /// The password prompt, if open.
    #[must_use]
    pub fn prompt(&self) -> Option<&PasswordPrompt> {
        self.prompt.as_ref()
    }

    /// Open the password prompt. Does nothing when already unlocked.
    pub fn request_unlock(&mut self) {
        if self.is_unlocked() {
            return;
        }
        if self.prompt.is_none() {
            debug!("Opening edit-mode password prompt");
            self.prompt = Some(PasswordPrompt::default());
        }
    }

    /// Header button: lock when unlocked, otherwise open the prompt.
    pub fn toggle(&mut self) {
        if self.is_unlocked() {
            self.lock();
        } else {
            self.request_unlock();
        }
    }

    /// Replace the prompt text, clearing any error. Opens the prompt if needed.
    pub fn set_input(&mut self, input: impl Into<String>) {
        if self.is_unlocked() {
            return;
        }
        let prompt = self.prompt.get_or_insert_with(PasswordPrompt::default);
        prompt.input = input.into();
        prompt.error = None;
    }

    /// Check the typed password.
    ///
    /// On a match the gate unlocks and the prompt closes. Otherwise the gate
    /// stays locked, the input is cleared and the error is set. Returns
    /// whether the gate is unlocked afterwards.
    pub fn submit(&mut self) -> bool {
        if self.is_unlocked() {
            return true;
        }
        let prompt = self.prompt.get_or_insert_with(PasswordPrompt::default);

        if prompt.input == EDIT_PASSWORD {
            info!("Edit mode enabled");
            self.mode = EditMode::Unlocked;
            self.prompt = None;
            true
        } else {
            debug!("Rejected edit-mode password");
            prompt.input.clear();
            prompt.error = Some(INCORRECT_PASSWORD);
            false
        }
    }

    /// Type `password` into the prompt and submit it.
    pub fn submit_password(&mut self, password: &str) -> bool {
        self.set_input(password);
        self.submit()
    }

    /// Close the prompt without unlocking.
    pub fn cancel(&mut self) {
        self.prompt = None;
    }

    /// Leave edit mode. No password is needed.
    pub fn lock(&mut self) {
        if self.is_unlocked() {
            info!("Edit mode disabled");
        }
        self.mode = EditMode::Locked;
        self.prompt = None;
    }
}
