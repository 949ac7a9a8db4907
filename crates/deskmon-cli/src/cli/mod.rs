//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use deskmon_core::config;
use deskmon_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "deskmon")]
#[command(version = "0.1")]
#[command(about = "Terminal client for the Support Dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and save a session
    Login {
        /// Email to log in with (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Register a new account
    Register,

    /// Log out (clear the saved session)
    Logout,

    /// Show the saved session, if any
    Status,

    /// Fetch the profile for the saved session
    Whoami,

    /// Open the Grafana monitoring dashboard
    Monitoring,

    /// Check that the API is reachable
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the API base URL in the config file
    SetUrl {
        /// Base URL of the API, e.g. http://localhost:8000
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive TUI
    let Some(command) = cli.command else {
        let _guard = logging::init_tui().context("init logging")?;
        return deskmon_tui::run(&config);
    };

    logging::init_headless();

    match command {
        Commands::Login { email } => commands::auth::login(&config, email.as_deref()).await,
        Commands::Register => commands::auth::register(&config).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(),
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::Monitoring => commands::monitoring::run(&config),
        Commands::Health => commands::health::run(&config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
