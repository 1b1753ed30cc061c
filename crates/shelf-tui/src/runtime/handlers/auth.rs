use std::path::Path;

use shelf_core::api::CatalogClient;
use shelf_core::config::Config;
use shelf_core::session::{Session, SessionStore};
use tracing::{debug, warn};

use crate::events::UiEvent;

/// Exchanges credentials for a session.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn sign_in(client: CatalogClient, identifier: String, secret: String) -> UiEvent {
    UiEvent::SignedIn(client.sign_in(&identifier, &secret).await)
}

/// Asks the server whether a restored token is still accepted.
pub async fn check_session(client: CatalogClient, token: String) -> UiEvent {
    UiEvent::SessionChecked(client.with_token(token).check_session().await)
}

/// Writes the session file. Returns an event only on failure.
pub fn persist_session(store: &SessionStore, session: &Session) -> Option<UiEvent> {
    match store.save(session) {
        Ok(()) => {
            debug!(path = %store.path().display(), "session saved");
            None
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "failed to save session");
            Some(UiEvent::SessionPersistFailed(format!("{err:#}")))
        }
    }
}

/// Removes the session file.
pub fn clear_session(store: &SessionStore) {
    match store.clear() {
        Ok(true) => debug!("session file removed"),
        Ok(false) => {}
        Err(err) => warn!(error = %format!("{err:#}"), "failed to remove session file"),
    }
}

/// Remembers the last identifier in `config.toml`.
pub fn persist_identifier(config_path: &Path, identifier: &str) {
    if let Err(err) = Config::save_last_identifier_to(config_path, identifier) {
        warn!(error = %format!("{err:#}"), "failed to remember identifier");
    }
}
