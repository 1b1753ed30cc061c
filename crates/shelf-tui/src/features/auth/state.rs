use std::fmt;

use shelf_core::session::Session;

/// Where the console is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// A restored session is being validated with the server.
    Checking,
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Identifier,
    Secret,
}

/// Credentials typed into the login view. Held only in memory.
#[derive(Default, Clone)]
pub struct LoginForm {
    pub identifier: String,
    pub secret: String,
    pub focus: LoginField,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("focus", &self.focus)
            .finish()
    }
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Identifier => &mut self.identifier,
            LoginField::Secret => &mut self.secret,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Identifier => LoginField::Secret,
            LoginField::Secret => LoginField::Identifier,
        };
    }

    pub fn is_complete(&self) -> bool {
        !self.identifier.trim().is_empty() && !self.secret.is_empty()
    }
}

/// Authentication state (session and login form).
#[derive(Debug)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub session: Option<Session>,
    pub form: LoginForm,
}

impl AuthState {
    /// Starts in `Checking` when a stored session was restored.
    pub fn new(restored: Option<Session>, last_identifier: Option<String>) -> Self {
        let identifier = restored
            .as_ref()
            .map(|s| s.identifier.clone())
            .filter(|id| !id.is_empty())
            .or(last_identifier)
            .unwrap_or_default();
        let focus = if identifier.is_empty() {
            LoginField::Identifier
        } else {
            LoginField::Secret
        };
        let phase = if restored.is_some() {
            AuthPhase::Checking
        } else {
            AuthPhase::SignedOut
        };

        Self {
            phase,
            session: restored,
            form: LoginForm {
                identifier,
                secret: String::new(),
                focus,
            },
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.phase == AuthPhase::SignedIn
    }

    /// Token for authenticated requests, while a session is held.
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn identifier(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.identifier.as_str())
    }

    /// Adopts a session; the typed secret is discarded.
    pub fn establish(&mut self, session: Session) {
        self.form.secret.clear();
        self.form.identifier.clone_from(&session.identifier);
        self.session = Some(session);
        self.phase = AuthPhase::SignedIn;
    }

    /// Drops the session and returns to the login view.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.phase = AuthPhase::SignedOut;
        self.form.secret.clear();
        self.form.focus = if self.form.identifier.is_empty() {
            LoginField::Identifier
        } else {
            LoginField::Secret
        };
        self.session.take()
    }
}
