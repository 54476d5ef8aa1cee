//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{config_cmd, registry_cmd, tui, upload};
use crate::cms::Cms;
use crate::storage::{Config, Project};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "TINA_LOG";

#[derive(Parser)]
#[command(name = "tina")]
#[command(author, version, about = "Terminal content-editing shell")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config's default_format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project config file (defaults to .tina/config.toml above the current directory)
    #[arg(long, short = 'c', global = true, env = "TINA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new tina project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// List registered field editors
    Fields,

    /// List registered screens
    Screens,

    /// List registered forms
    Forms,

    /// List every plugin collection, or one collection by type
    Plugins {
        /// Plugin type to list (e.g. field, screen, toolbar)
        #[arg(long = "type", short = 't')]
        plugin_type: Option<String>,
    },

    /// Show the effective sidebar and media configuration
    Config,

    /// Upload files through the configured media store
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target directory inside the media root
        #[arg(long, short = 'd', default_value = "")]
        directory: String,
    },

    /// Open the interactive shell
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Tui) {
        init_tracing(cli.verbose);
    }

    tracing::debug!("tina starting");

    if let Commands::Init { path } = &cli.command {
        let project = Project::init(path)?;
        tracing::debug!(dir = %project.tina_dir().display(), "created project directory");
        let output = Output::new(cli.format.unwrap_or_default());
        output.success(&format!(
            "Initialized tina project at {}",
            project.root().display()
        ));
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format);
    let cms = build_cms(&config)?;

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Fields => registry_cmd::fields(&cms, &output),
        Commands::Screens => registry_cmd::screens(&cms, &output),
        Commands::Forms => registry_cmd::forms(&cms, &output),
        Commands::Plugins { plugin_type } => {
            registry_cmd::plugins(&cms, &output, plugin_type.as_deref())?
        }
        Commands::Config => config_cmd::show(&config, &cms, &output),
        Commands::Upload { files, directory } => {
            upload::run(&cms, &output, &files, &directory)?
        }
        Commands::Tui => tui::run(cms)?,
    }

    tracing::debug!("command completed");
    Ok(())
}

/// Installs the stderr log subscriber: `TINA_LOG` if set, else `warn`
/// (`debug` with `--verbose`)
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

fn build_cms(config: &Config) -> Result<Cms> {
    let cms_config = config.cms_config()?;
    Cms::new(cms_config).context("Failed to register configured plugins")
}
