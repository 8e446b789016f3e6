//! Server URL management and status probe.

use std::path::Path;

use anyhow::Result;
use cinescope_client::{ApiClient, SessionStore};

use crate::config::ClientConfig;

/// Show or set the server URL.
pub fn server(url: Option<&str>, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    match url {
        Some(url) => {
            config.server = url.trim_end_matches('/').to_string();
            config.save(config_path)?;
            println!("Server set to {}.", config.server);
        }
        None => {
            if config.server.is_empty() {
                println!("No server URL set. Run `cinescope server <url>`.");
            } else {
                println!("{}", config.server);
            }
        }
    }
    Ok(())
}

/// STATUS — check server health and session state.
pub async fn status(config_path: &Path, session_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;

    println!(
        "Server:    {}",
        if config.server.is_empty() {
            "-"
        } else {
            &config.server
        }
    );

    match SessionStore::new(session_path).load() {
        Ok(Some(session)) => println!("Session:   {} (token on file)", session.user.username),
        Ok(None) => println!("Session:   none"),
        Err(e) => println!("Session:   unreadable ({})", e),
    }

    if config.server.is_empty() {
        println!("Status:    no server configured");
        return Ok(());
    }

    match ApiClient::new(config.server.as_str()).health().await {
        Ok(()) => println!("Status:    connected"),
        Err(e) => println!("Status:    disconnected ({})", e),
    }
    Ok(())
}
