//! nextcloud-upload - upload a file to a Nextcloud public share
//!
//! A CLI tool for uploading files to Nextcloud public share links over
//! WebDAV, with optional share passwords and a connection test.

#![forbid(unsafe_code)]

use std::{io, process::ExitCode};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::debug;

use cli::Cli;
use config::Config;

mod cli;
mod clients;
mod commands;
mod config;
mod progress;

#[cfg(test)]
mod tests;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_level());
    debug!("CLI args: {cli:?}");

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    debug!("Config loaded: {config:?}");

    Ok(ExitCode::from(commands::run(&cli, &config)?))
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
