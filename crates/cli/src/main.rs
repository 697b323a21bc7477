//! tradeprompt CLI: the main entry point.
//!
//! Commands:
//! - `run`    : Interactive request builder (default)
//! - `config` : Show, locate, validate or initialise the config file
//! - `status` : Show the effective configuration at a glance

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "tradeprompt",
    about = "tradeprompt: interactive FIX request builder",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.tradeprompt/config.toml)
    #[arg(short, long, global = true, env = "TRADEPROMPT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and send requests interactively
    Run,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show effective configuration
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the config file
    Validate,
    /// Write a default config file if none exists
    Init,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so prompts on stdout stay readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(tradeprompt_config::AppConfig::config_path);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&config_path)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&config_path)?,
            ConfigAction::Path => commands::config_cmd::path(&config_path)?,
            ConfigAction::Validate => commands::config_cmd::validate(&config_path)?,
            ConfigAction::Init => commands::config_cmd::init(&config_path)?,
        },
        Commands::Status => commands::status::run(&config_path)?,
    }

    Ok(())
}
