//! Full-screen admin console for the product catalog.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::{Context, Result};
pub use features::{auth, catalog, statusline};
pub use runtime::TuiRuntime;
use shelf_core::api::CatalogClient;
use shelf_core::config::{Config, paths};
use shelf_core::session::SessionStore;

use crate::state::AppState;

/// Runs the interactive console until the user quits.
///
/// Must be called from within a tokio runtime; requests run as spawned tasks.
///
/// # Errors
/// Returns an error if there is no terminal, the client cannot be built from
/// `config`, or the terminal fails.
pub fn run_console(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The console requires a terminal.\n\
             Use `shelf products list` for non-interactive access."
        );
    }

    let client = CatalogClient::from_config(config)?;
    let store = SessionStore::default();
    let restored = store.restore().context("restore session")?;
    let server = client.base_url().to_string();

    let state = AppState::new(server, restored, config.last_identifier.clone());
    let mut runtime = TuiRuntime::new(state, client, store, paths::config_path())?;
    runtime.run()
}
