//! `cinescoped` — the CineScope server binary.
//!
//! Usage:
//!   cinescoped -c <name-or-path> [--listen <addr>]
//!
//! The name resolves to `/etc/cinescope/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod routes;
mod session_gate;

use std::sync::Arc;

use clap::Parser;
use cinescope_core::Module;
use tracing::info;

use config::ServerConfig;

/// CineScope server.
#[derive(Parser, Debug)]
#[command(name = "cinescoped", about = "CineScope server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:5000).
    #[arg(long = "listen", default_value = "0.0.0.0:5000")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    config::verify_config(&server_config)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let sql: Arc<dyn cinescope_sql::SQLStore> = Arc::new(
        cinescope_sql::SqliteStore::open(&data_dir.join("cinescope.sqlite"))
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // Initialize modules. Auth goes first so the users table exists
    // before the favorites schema references it.
    let auth_config = auth::service::AuthConfig {
        jwt_secret: server_config.jwt.secret.clone(),
        token_ttl: server_config.jwt.expire_secs,
    };
    let auth_module = auth::AuthModule::new(Arc::clone(&sql), auth_config)?;
    info!("Auth module initialized");

    let favorites_module = favorites::FavoritesModule::new(Arc::clone(&sql))?;
    info!("Favorites module initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (favorites_module.name(), favorites_module.routes()),
    ];

    // Build router. The session gate wraps every route.
    let app = routes::build_router(auth_module.service().clone(), module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("CineScope server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
