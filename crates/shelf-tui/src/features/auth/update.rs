//! Auth feature reducer.
//!
//! Handles login form input and the results of the sign-in and session-check
//! tasks. Session teardown touches the overlay too, so it lives in the root
//! reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shelf_core::api::ApiError;
use shelf_core::session::Session;
use tracing::{info, warn};

use super::{AuthPhase, LoginField};
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::TuiState;
use crate::statusline::{Notice, NoticeKind};

/// Handles a key while the login view is shown.
pub fn handle_login_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            tui.auth.form.toggle_focus();
            vec![]
        }
        KeyCode::Enter => submit_login(tui),
        _ if tui.auth.phase != AuthPhase::SignedOut => vec![],
        KeyCode::Backspace => {
            tui.auth.form.focused_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            tui.auth.form.focused_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit_login(tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.auth.phase != AuthPhase::SignedOut {
        return vec![];
    }
    if !tui.auth.form.is_complete() {
        if tui.auth.form.focus == LoginField::Identifier && !tui.auth.form.identifier.is_empty() {
            tui.auth.form.focus = LoginField::Secret;
            return vec![];
        }
        tui.set_notice(Notice::new(
            NoticeKind::Auth,
            "Enter both identifier and secret",
        ));
        return vec![];
    }
    let Some(task) = tui.start_task(TaskKind::SignIn) else {
        return vec![];
    };

    tui.notice = None;
    vec![UiEffect::SignIn {
        task,
        identifier: tui.auth.form.identifier.trim().to_string(),
        secret: tui.auth.form.secret.clone(),
    }]
}

/// Starts validating a restored session, if there is one.
pub fn start_session_check(tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.auth.phase != AuthPhase::Checking {
        return vec![];
    }
    let Some(token) = tui.auth.token().map(str::to_string) else {
        tui.auth.phase = AuthPhase::SignedOut;
        return vec![];
    };
    match tui.start_task(TaskKind::SessionCheck) {
        Some(task) => vec![UiEffect::CheckSession { task, token }],
        None => vec![],
    }
}

/// Outcome of the startup session check that needs the root reducer.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCheckOutcome {
    Valid,
    /// The server rejected the token; the stored session should be removed.
    Rejected,
    /// The check could not be completed; the stored session is kept.
    Unverified,
}

/// Applies the startup session check. Failures are only logged.
pub fn handle_session_checked(
    tui: &mut TuiState,
    result: Result<(), ApiError>,
) -> (Vec<UiEffect>, SessionCheckOutcome) {
    match result {
        Ok(()) => {
            let Some(session) = tui.auth.session.clone() else {
                return (vec![], SessionCheckOutcome::Unverified);
            };
            info!(identifier = %session.identifier, "restored session accepted");
            tui.auth.establish(session);
            let effects = tui.refresh_products(true).into_iter().collect();
            (effects, SessionCheckOutcome::Valid)
        }
        Err(err) if err.is_unauthorized() => {
            info!("restored session rejected by server");
            tui.auth.sign_out();
            (vec![UiEffect::ClearSession], SessionCheckOutcome::Rejected)
        }
        Err(err) => {
            warn!(error = %err, "could not verify restored session");
            tui.auth.sign_out();
            (vec![], SessionCheckOutcome::Unverified)
        }
    }
}

/// Applies a credentials exchange result.
pub fn handle_signed_in(tui: &mut TuiState, result: Result<Session, ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            info!(identifier = %session.identifier, "signed in");
            let identifier = session.identifier.clone();
            tui.auth.establish(session.clone());
            tui.set_notice(Notice::info(format!("Signed in as {identifier}")));

            let mut effects = vec![
                UiEffect::PersistSession { session },
                UiEffect::PersistIdentifier { identifier },
            ];
            effects.extend(tui.refresh_products(true));
            effects
        }
        Err(err) => {
            warn!(error = %err, "sign-in failed");
            tui.auth.phase = AuthPhase::SignedOut;
            tui.set_notice(Notice::new(NoticeKind::Auth, err.message));
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;
    use shelf_core::api::ApiErrorKind;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn tui() -> TuiState {
        TuiState::new("http://localhost".to_string(), None, None)
    }

    fn type_text(tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_login_key(tui, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut tui = tui();
        type_text(&mut tui, "admin");
        handle_login_key(&mut tui, key(KeyCode::Tab));
        type_text(&mut tui, "pw");
        handle_login_key(&mut tui, key(KeyCode::Backspace));

        assert_eq!(tui.auth.form.identifier, "admin");
        assert_eq!(tui.auth.form.secret, "p");
    }

    #[test]
    fn test_submit_emits_single_sign_in() {
        let mut tui = tui();
        tui.auth.form.identifier = "admin".to_string();
        tui.auth.form.secret = "pw".to_string();

        let effects = handle_login_key(&mut tui, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SignIn { identifier, secret, .. }] if identifier == "admin" && secret == "pw"
        ));

        // Second Enter while the exchange is outstanding is dropped.
        assert!(handle_login_key(&mut tui, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_submit_incomplete_form_sets_notice() {
        let mut tui = tui();
        let effects = handle_login_key(&mut tui, key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(tui.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Auth));
    }

    #[test]
    fn test_sign_in_failure_stays_signed_out() {
        let mut tui = tui();
        tui.auth.form.secret = "pw".to_string();

        let effects = handle_signed_in(
            &mut tui,
            Err(ApiError::new(ApiErrorKind::HttpStatus, "HTTP 400: wrong password")),
        );

        assert!(effects.is_empty());
        assert_eq!(tui.auth.phase, AuthPhase::SignedOut);
        assert_eq!(tui.auth.form.secret, "pw");
        assert_eq!(
            tui.notice,
            Some(Notice::new(NoticeKind::Auth, "HTTP 400: wrong password"))
        );
    }

    #[test]
    fn test_sign_in_success_persists_and_fetches() {
        let mut tui = tui();
        let session = Session {
            token: "tok".to_string(),
            expires: u64::MAX,
            identifier: "admin".to_string(),
        };

        let effects = handle_signed_in(&mut tui, Ok(session));

        assert!(tui.auth.is_signed_in());
        assert!(matches!(effects[0], UiEffect::PersistSession { .. }));
        assert!(matches!(effects[1], UiEffect::PersistIdentifier { .. }));
        assert!(matches!(effects[2], UiEffect::FetchProducts { ref token, .. } if token == "tok"));
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn test_session_check_rejected_clears_session() {
        let session = Session {
            token: "tok".to_string(),
            expires: u64::MAX,
            identifier: "admin".to_string(),
        };
        let mut tui = TuiState::new("http://localhost".to_string(), Some(session), None);
        assert_eq!(start_session_check(&mut tui).len(), 1);

        let (effects, outcome) = handle_session_checked(
            &mut tui,
            Err(ApiError::new(ApiErrorKind::Unauthorized, "HTTP 401")),
        );

        assert_eq!(outcome, SessionCheckOutcome::Rejected);
        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert_eq!(tui.auth.phase, AuthPhase::SignedOut);
        assert!(tui.auth.session.is_none());
        assert!(tui.notice.is_none());
    }
}
