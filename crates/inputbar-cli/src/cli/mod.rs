//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inputbar_core::config::Config;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "inputbar")]
#[command(version)]
#[command(about = "Ask a question or submit data from a single input")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start an interactive input session (default)
    Session,
    /// Classify and submit one input, then exit
    ///
    /// With no flag the text is read from stdin.
    Submit {
        /// Text to submit
        #[arg(long, conflicts_with_all = ["file", "page"])]
        text: Option<String>,

        /// File to attach and upload
        #[arg(long, value_name = "PATH", conflicts_with = "page")]
        file: Option<PathBuf>,

        /// Page URL to capture and upload
        #[arg(long, value_name = "URL")]
        page: Option<String>,
    },
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
    /// Load the config and report suspicious values
    Check,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // default to an interactive session
    match cli.command.unwrap_or(Commands::Session) {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Check => commands::config::check(),
        },
        Commands::Session => run_async(|config| async move {
            commands::session::run(&config).await
        }),
        Commands::Submit { text, file, page } => {
            let input = match (text, file, page) {
                (_, Some(path), _) => commands::submit::Input::File(path),
                (_, _, Some(url)) => commands::submit::Input::Page(url),
                (Some(text), _, _) => commands::submit::Input::Text(text),
                (None, None, None) => commands::submit::Input::Stdin,
            };
            run_async(|config| async move { commands::submit::run(&config, input).await })
        }
    }
}

/// Loads config, installs logging, and drives `command` on one tokio runtime.
fn run_async<F, Fut>(command: F) -> Result<()>
where
    F: FnOnce(Config) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let config = Config::load().context("load config")?;
    let _log_guard = logging::init_logging()?;
    for warning in config.validate() {
        tracing::warn!(field = warning.field, "{}", warning.message);
    }

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(command(config))
}
