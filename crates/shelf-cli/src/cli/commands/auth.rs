//! Login and logout handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use shelf_core::api::CatalogClient;
use shelf_core::config::Config;
use shelf_core::session::SessionStore;
use tracing::warn;

pub async fn login(config: &Config, identifier: Option<String>) -> Result<()> {
    let Some(identifier) = identifier
        .or_else(|| config.last_identifier.clone())
        .filter(|id| !id.trim().is_empty())
    else {
        bail!("No identifier given. Pass --identifier ID.");
    };

    let secret = read_secret()?;
    if secret.is_empty() {
        bail!("No secret provided on stdin");
    }

    let client = CatalogClient::from_config(config)?;
    let session = client
        .sign_in(identifier.trim(), &secret)
        .await
        .context("sign in")?;

    let store = SessionStore::default();
    store.save(&session)?;
    if let Err(err) = Config::save_last_identifier(&session.identifier) {
        warn!(error = %format!("{err:#}"), "failed to remember identifier");
    }

    println!(
        "Signed in as {} (session expires {})",
        session.identifier,
        session.expires_display()
    );
    Ok(())
}

/// Reads one line from stdin, prompting when stdin is a terminal.
fn read_secret() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Secret: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line).context("read secret")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::default();
    if store.clear()? {
        println!("Signed out");
    } else {
        println!("No stored session");
    }
    Ok(())
}
