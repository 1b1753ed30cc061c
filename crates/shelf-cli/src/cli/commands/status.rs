//! Session status handler.

use anyhow::Result;
use shelf_core::api::CatalogClient;
use shelf_core::config::Config;
use shelf_core::session::SessionStore;

pub async fn run(config: &Config, offline: bool) -> Result<()> {
    let store = SessionStore::default();
    println!("Server:     {}", config.effective_base_url()?);

    let Some(session) = store.load()? else {
        println!("Session:    none (run `shelf login`)");
        return Ok(());
    };

    println!("Identifier: {}", session.identifier);
    println!("Token:      {}", session.masked_token());
    if session.is_expired() {
        println!("Expires:    {} (expired)", session.expires_display());
        return Ok(());
    }
    println!("Expires:    {}", session.expires_display());

    if offline {
        return Ok(());
    }

    let client = CatalogClient::from_config(config)?.with_token(session.token);
    match client.check_session().await {
        Ok(()) => println!("Accepted:   yes"),
        Err(err) if err.is_unauthorized() => println!("Accepted:   no ({err})"),
        Err(err) => println!("Accepted:   unknown ({err})"),
    }
    Ok(())
}
