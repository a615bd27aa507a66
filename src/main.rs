//! # nameinfo CLI
//!
//! ```bash
//! nameinfo --config ./config/nameinfo.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `nameinfo init` | Create the SQLite cache and run schema migrations |
//! | `nameinfo lookup <name>` | Look up a name (cache first) |
//! | `nameinfo recent` | List cached lookups, newest first |
//! | `nameinfo show <name>` | Print a cached record without querying the services |
//! | `nameinfo forget <name>` | Remove a cached record |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use nameinfo::{commands, config, migrate};

/// nameinfo — gender, age and nationality estimates for a name.
#[derive(Parser)]
#[command(
    name = "nameinfo",
    about = "nameinfo — gender, age and nationality estimates for a name",
    version,
    long_about = "Queries the genderize, agify and nationalize services for a name, merges \
    the answers into one record and keeps it in a local SQLite cache so repeated lookups \
    are served offline."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/nameinfo.toml`. When the file does not exist,
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/nameinfo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the cache database.
    ///
    /// Creates the SQLite file and the `names` table. Safe to run repeatedly.
    Init,

    /// Look up a name.
    ///
    /// The name is trimmed and capitalized first. Names already in the cache
    /// are answered from it without any network call.
    Lookup {
        /// The name to look up.
        name: String,

        /// Two-letter country hint; overrides config and system locale.
        #[arg(long)]
        country: Option<String>,

        /// Query the services even if the name is cached.
        #[arg(long)]
        refresh: bool,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List cached lookups, newest first.
    Recent {
        /// Show at most this many entries.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a cached record.
    Show {
        name: String,

        #[arg(long)]
        json: bool,
    },

    /// Remove a name from the cache.
    Forget { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Lookup {
            name,
            country,
            refresh,
            json,
        } => {
            commands::run_lookup(&cfg, &name, country, refresh, json).await?;
        }
        Commands::Recent { limit, json } => {
            commands::run_recent(&cfg, limit, json).await?;
        }
        Commands::Show { name, json } => {
            commands::run_show(&cfg, &name, json).await?;
        }
        Commands::Forget { name } => {
            commands::run_forget(&cfg, &name).await?;
        }
    }

    Ok(())
}
