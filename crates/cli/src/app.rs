//! Command line arguments and startup
//!
//! Loads the configuration, applies flag overrides, connects the object
//! store and then either runs a single command line (`-c`) or the
//! interactive session on stdin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tokio::io::BufReader;

use s3fs_core::{Config, ConfigManager, LoaderStyle, MemoryStore, ObjectStore};
use s3fs_s3::S3Client;

use crate::dispatcher::Dispatcher;
use crate::exit_code::ExitCode;
use crate::indicator::{self, Indicator, QuietIndicator};
use crate::listener::TextListener;
use crate::output::{Formatter, Output, Stdout};
use crate::session::Session;

/// s3fs - browse S3-compatible object storage like a filesystem
///
/// Starts an interactive shell with `ls`, `cd`, `pwd`, `get`, `put`, `clear`
/// and `exit`. Several commands can be chained on one line with `&&`.
#[derive(Parser, Debug)]
#[command(name = "s3fs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, env = "S3FS_CONFIG")]
    pub config: Option<PathBuf>,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, default_value = "false")]
    pub path_style: bool,

    /// Loading indicator style
    #[arg(long, value_enum)]
    pub loader: Option<LoaderArg>,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Run one line of commands and exit
    #[arg(short, long, value_name = "LINE")]
    pub command: Option<String>,

    /// Use a built-in in-memory store instead of S3
    #[arg(long, default_value = "false")]
    pub memory: bool,

    /// Write the effective configuration back to the config file
    #[arg(long, default_value = "false")]
    pub save_config: bool,
}

/// Loading indicator selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoaderArg {
    Dots,
    Spinner,
    None,
}

impl From<LoaderArg> for LoaderStyle {
    fn from(arg: LoaderArg) -> Self {
        match arg {
            LoaderArg::Dots => LoaderStyle::Dots,
            LoaderArg::Spinner => LoaderStyle::Spinner,
            LoaderArg::None => LoaderStyle::None,
        }
    }
}

impl Cli {
    /// Override configuration values with the flags that were given
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(region) = &self.region {
            config.connection.region = region.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.connection.endpoint = Some(endpoint.clone());
        }
        if self.path_style {
            config.connection.path_style = true;
        }
        if let Some(loader) = self.loader {
            config.shell.loader = loader.into();
        }
    }
}

/// Run the shell and report how it ended
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new().context("Failed to locate configuration")?,
    };
    let mut config = manager.load().with_context(|| {
        format!(
            "Failed to load configuration from {}",
            manager.config_path().display()
        )
    })?;
    cli.apply_overrides(&mut config);
    config
        .connection
        .validate()
        .context("Invalid connection settings")?;

    if cli.save_config {
        manager.save(&config).context("Failed to save configuration")?;
        tracing::info!(path = %manager.config_path().display(), "saved configuration");
    }

    let store: Arc<dyn ObjectStore> = if cli.memory {
        Arc::new(MemoryStore::sample())
    } else {
        Arc::new(
            S3Client::new(&config.connection)
                .await
                .context("Failed to create S3 client")?,
        )
    };

    let out: Arc<dyn Output> = Arc::new(Stdout);
    let formatter = Formatter::from_mode(config.shell.color, cli.no_color);

    if let Some(line) = &cli.command {
        let indicator: Arc<dyn Indicator> = Arc::new(QuietIndicator::new(out.clone(), None));
        let mut session = Session::new(Dispatcher::new(store, indicator), out, formatter);
        return Ok(if session.run_line(line).await {
            ExitCode::Success
        } else {
            ExitCode::CommandFailed
        });
    }

    let indicator = indicator::from_config(&config.shell, out.clone());
    let mut listener = TextListener::new(BufReader::new(tokio::io::stdin()), indicator.clone());
    let mut session = Session::new(Dispatcher::new(store, indicator), out, formatter);
    session
        .run(&mut listener)
        .await
        .context("Failed to read input")?;

    Ok(ExitCode::Success)
}
