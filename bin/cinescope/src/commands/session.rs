//! Register / login / logout / whoami commands.

use std::path::Path;

use anyhow::Result;
use cinescope_client::{ApiClient, ApiError, FavoriteSync, SessionStore};

use crate::config::ClientConfig;

/// Build a synchronizer for the configured server.
fn connect(config_path: &Path) -> Result<FavoriteSync> {
    let config = ClientConfig::load(config_path)?;
    let server = config.require_server()?;
    Ok(FavoriteSync::new(ApiClient::new(server)))
}

/// Restore the persisted session into a live synchronizer, hydrating
/// the favorite set from the server.
pub async fn restore(config_path: &Path, session_path: &Path) -> Result<FavoriteSync> {
    let store = SessionStore::new(session_path);
    let Some(session) = store.load()? else {
        anyhow::bail!("Not logged in. Run `cinescope login`.");
    };

    let sync = connect(config_path)?;
    match sync.restore(session).await {
        Ok(_) => Ok(sync),
        Err(ApiError::SessionExpired) => {
            store.clear()?;
            anyhow::bail!("Session rejected by server. Run `cinescope login`.");
        }
        Err(e) => Err(e.into()),
    }
}

/// Register a new account and persist its session.
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    config_path: &Path,
    session_path: &Path,
) -> Result<()> {
    let sync = connect(config_path)?;
    let user = sync.register(username, email, password).await?;

    persist(&sync, session_path)?;
    println!("Registered and logged in as {}.", user.username);
    Ok(())
}

/// Log in and persist the session.
pub async fn login(
    username: &str,
    password: &str,
    config_path: &Path,
    session_path: &Path,
) -> Result<()> {
    let sync = connect(config_path)?;
    let user = sync.login(username, password).await?;

    persist(&sync, session_path)?;
    println!("Logged in as {}.", user.username);
    println!("{} favorite(s) on file.", sync.favorite_count());
    Ok(())
}

/// Logout — drop the persisted session.
pub fn logout(session_path: &Path) -> Result<()> {
    SessionStore::new(session_path).clear()?;
    println!("Logged out.");
    Ok(())
}

/// Show the saved account without contacting the server.
pub fn whoami(session_path: &Path) -> Result<()> {
    match SessionStore::new(session_path).load()? {
        Some(session) => {
            println!("Username:  {}", session.user.username);
            println!("Email:     {}", session.user.email);
            println!("User id:   {}", session.user.id);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

fn persist(sync: &FavoriteSync, session_path: &Path) -> Result<()> {
    let session = sync
        .session()
        .ok_or_else(|| anyhow::anyhow!("no session established"))?;
    SessionStore::new(session_path).save(&session)?;
    Ok(())
}
