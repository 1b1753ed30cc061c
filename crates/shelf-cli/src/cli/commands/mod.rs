//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod console;
pub mod products;
pub mod status;

use anyhow::{Result, bail};
use shelf_core::api::{ApiError, CatalogClient};
use shelf_core::config::Config;
use shelf_core::session::SessionStore;
use tracing::warn;

/// Builds a client carrying the stored session's token.
fn signed_in_client(config: &Config, store: &SessionStore) -> Result<CatalogClient> {
    let Some(session) = store.restore()? else {
        bail!("Not signed in. Run `shelf login` first.");
    };
    Ok(CatalogClient::from_config(config)?.with_token(session.token))
}

/// Clears the stored session when the server rejected it.
fn api_failure(store: &SessionStore, err: ApiError) -> anyhow::Error {
    if err.is_unauthorized() {
        if let Err(clear_err) = store.clear() {
            warn!(error = %format!("{clear_err:#}"), "failed to remove rejected session");
        }
        return anyhow::anyhow!("{err}\nSession rejected by the server. Run `shelf login` again.");
    }
    err.into()
}
