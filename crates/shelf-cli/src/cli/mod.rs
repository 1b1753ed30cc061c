//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use shelf_core::config::{self, paths};
use shelf_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Terminal admin console for a product catalog API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in; the secret is read from stdin
    Login {
        /// Account identifier (defaults to the last one used)
        #[arg(long, value_name = "ID")]
        identifier: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// Show the stored session and whether the server accepts it
    Status {
        /// Do not contact the server
        #[arg(long)]
        offline: bool,
    },
    /// Manage catalog products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ProductCommands {
    /// List all products
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a product
    Delete {
        /// The ID of the product to delete
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive console
    let Some(command) = cli.command else {
        let _guard = logging::init_file(&paths::logs_dir(), &config.log_filter)?;
        tracing::info!("console starting");
        return commands::console::run(&config);
    };

    logging::init_stderr(&config.log_filter);

    match command {
        Commands::Login { identifier } => commands::auth::login(&config, identifier).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Status { offline } => commands::status::run(&config, offline).await,
        Commands::Products { command } => match command {
            ProductCommands::List { json } => commands::products::list(&config, json).await,
            ProductCommands::Delete { id } => commands::products::delete(&config, &id).await,
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
