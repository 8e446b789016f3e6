//! `cinescope` — the CineScope CLI client.
//!
//! Talks to a cinescoped server: accounts, sessions, and favorites.

mod commands;
mod config;

use clap::{Parser, Subcommand};

use config::ClientConfig;

/// CineScope CLI tool.
#[derive(Parser, Debug)]
#[command(name = "cinescope", about = "CineScope CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.cinescope/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or set the server URL.
    Server {
        /// New server URL (prints the current one if omitted).
        url: Option<String>,
    },

    /// Create an account and log in.
    Register {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Email address.
        #[arg(long)]
        email: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in to the configured server.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — drop the saved session.
    Logout,

    /// Show the logged-in account.
    Whoami,

    /// Check server status.
    Status,

    /// Favorites operations.
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum FavAction {
    /// List favorites.
    List,

    /// Add a favorite.
    Add {
        /// TMDb id of the item.
        tmdb_id: i64,
        /// Display title.
        title: String,
        /// movie or tv.
        #[arg(long = "media-type", default_value = "movie")]
        media_type: String,
        /// Poster path.
        #[arg(long)]
        poster: Option<String>,
        /// Numeric rating.
        #[arg(long)]
        rating: Option<f64>,
        /// Release date (YYYY-MM-DD).
        #[arg(long)]
        released: Option<String>,
    },

    /// Remove a favorite by TMDb id.
    Rm {
        /// TMDb id of the item.
        tmdb_id: i64,
    },

    /// Ask the server whether an id is favorited.
    Check {
        /// TMDb id of the item.
        tmdb_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let session_path = config::session_path_for(&config_path);

    match cli.command {
        Commands::Server { url } => {
            commands::server::server(url.as_deref(), &config_path)?;
        }

        Commands::Register {
            user,
            email,
            password,
        } => {
            let username = user.unwrap_or_else(|| prompt("Username: "));
            let email = email.unwrap_or_else(|| prompt("Email: "));
            let password = match password {
                Some(p) => p,
                None => {
                    let pw = rpassword::prompt_password("Password: ")?;
                    let confirm = rpassword::prompt_password("Confirm password: ")?;
                    if pw != confirm {
                        anyhow::bail!("Passwords do not match.");
                    }
                    pw
                }
            };
            commands::session::register(&username, &email, &password, &config_path, &session_path)
                .await?;
        }

        Commands::Login { user, password } => {
            let username = user.unwrap_or_else(|| prompt("Username: "));
            let password = password
                .unwrap_or_else(|| rpassword::prompt_password("Password: ").unwrap_or_default());
            commands::session::login(&username, &password, &config_path, &session_path).await?;
        }

        Commands::Logout => {
            commands::session::logout(&session_path)?;
        }

        Commands::Whoami => {
            commands::session::whoami(&session_path)?;
        }

        Commands::Status => {
            commands::server::status(&config_path, &session_path).await?;
        }

        Commands::Fav { action } => {
            let output_json = cli.output == "json";
            match action {
                FavAction::List => {
                    commands::favorites::list(output_json, &config_path, &session_path).await?;
                }
                FavAction::Add {
                    tmdb_id,
                    title,
                    media_type,
                    poster,
                    rating,
                    released,
                } => {
                    commands::favorites::add(
                        tmdb_id,
                        &title,
                        &media_type,
                        poster,
                        rating,
                        released,
                        &config_path,
                        &session_path,
                    )
                    .await?;
                }
                FavAction::Rm { tmdb_id } => {
                    commands::favorites::rm(tmdb_id, &config_path, &session_path).await?;
                }
                FavAction::Check { tmdb_id } => {
                    commands::favorites::check(tmdb_id, &config_path, &session_path).await?;
                }
            }
        }

        Commands::Version => {
            println!("cinescope cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn prompt(label: &str) -> String {
    eprint!("{}", label);
    let mut s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    s.trim().to_string()
}
