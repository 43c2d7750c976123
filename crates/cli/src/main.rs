//! s3fs - interactive shell for S3-compatible object storage
//!
//! Presents buckets and keys as a navigable directory tree.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3fs_cli::app::{self, Cli};
use s3fs_cli::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with shell output
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = match app::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::StartupError
        }
    };

    std::process::exit(exit_code.as_i32());
}
