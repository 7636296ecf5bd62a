//! Command handlers for the nextcloud-upload CLI.
//!
//! This module runs the selected operation and turns its outcome into
//! console output and a process exit code, keeping the main module
//! focused on argument parsing and setup.

#![forbid(unsafe_code)]

use std::{
    io::IsTerminal,
    path::Path,
    sync::Arc,
};

use color_eyre::eyre::{eyre, Result};
use nextcloud_upload_lib::{
    ErrorKind, ProgressObserver, ShareReference, UploadOutcome, Uploader,
};
use tracing::{error, info};

use crate::{
    cli::Cli,
    clients::{create_uploader, resolve_share, share_url},
    config::Config,
    progress::BarObserver,
};

/// Context for CLI operations.
///
/// Bundles the resolved share and the uploader built for this invocation.
pub struct CommandContext<'a> {
    /// The share being uploaded to.
    pub share: &'a ShareReference,
    /// HTTP uploader.
    pub uploader: &'a Uploader,
    /// Whether to suppress everything but errors.
    pub quiet: bool,
}

impl<'a> CommandContext<'a> {
    /// Creates a new command context.
    pub const fn new(share: &'a ShareReference, uploader: &'a Uploader, quiet: bool) -> Self {
        Self {
            share,
            uploader,
            quiet,
        }
    }
}

/// Resolves the share, builds the uploader and runs the selected command.
///
/// # Errors
///
/// Returns an error for setup failures (no share URL, invalid
/// configuration). Upload and connection failures are reported through
/// the returned exit status instead.
pub fn run(cli: &Cli, config: &Config) -> Result<u8> {
    let url = share_url(cli, config)?;
    let share = match resolve_share(url, cli, config) {
        Ok(share) => share,
        Err(e) => {
            error!("Invalid share URL: {e}");
            eprintln!("✗ Error: {e}");
            return Ok(exit_code(Some(e.kind())));
        }
    };
    let uploader = create_uploader(cli, config)?;
    let ctx = CommandContext::new(&share, &uploader, cli.quiet);

    if cli.test_connection {
        return Ok(test_connection(&ctx));
    }

    match &cli.file {
        Some(file) => upload(&ctx, file, cli.remote_name.as_deref()),
        None => Err(eyre!("--file is required for uploads")),
    }
}

/// Probes the share without uploading.
pub fn test_connection(ctx: &CommandContext<'_>) -> u8 {
    info!("Testing connection to share...");
    let outcome = ctx.uploader.test_connection(ctx.share);

    if outcome.is_success() {
        if !ctx.quiet {
            println!("✓ Connection successful");
        }
    } else {
        eprintln!("✗ Connection failed: {}", outcome.message());
    }
    outcome_exit_code(&outcome)
}

/// Uploads `path` to the share.
///
/// # Errors
///
/// Returns an error if the progress bar cannot be set up.
pub fn upload(ctx: &CommandContext<'_>, path: &Path, remote_name: Option<&str>) -> Result<u8> {
    let display_name = remote_name.map_or_else(
        || {
            path.file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
        },
        str::to_string,
    );

    info!("Starting upload of {}", path.display());

    let observer = progress_observer(ctx, path, &display_name)?;
    let outcome = ctx.uploader.upload_file(ctx.share, path, remote_name, observer);

    if outcome.is_success() {
        if !ctx.quiet {
            println!("✓ Successfully uploaded {display_name}");
        }
    } else {
        error!("Upload failed: {}", outcome.message());
        eprintln!("✗ Failed to upload {display_name}: {}", outcome.message());
    }
    Ok(outcome_exit_code(&outcome))
}

/// A progress bar, unless quiet or stdout is not a terminal.
fn progress_observer(
    ctx: &CommandContext<'_>,
    path: &Path,
    name: &str,
) -> Result<Option<Arc<dyn ProgressObserver>>> {
    if ctx.quiet || !std::io::stdout().is_terminal() {
        return Ok(None);
    }
    // Missing files are reported by the uploader; no bar in that case.
    let Ok(metadata) = std::fs::metadata(path) else {
        return Ok(None);
    };
    Ok(Some(Arc::new(BarObserver::new(name, metadata.len())?)))
}

fn outcome_exit_code(outcome: &UploadOutcome) -> u8 {
    exit_code(outcome.error().map(|e| e.kind()))
}

/// Process exit status for a failure kind; `None` means success.
#[must_use]
pub const fn exit_code(kind: Option<ErrorKind>) -> u8 {
    match kind {
        None => 0,
        Some(ErrorKind::InvalidShareUrl | ErrorKind::InvalidRemoteName) => 2,
        Some(ErrorKind::LocalFileNotFound) => 3,
        Some(ErrorKind::AuthenticationFailed) => 4,
        Some(ErrorKind::PermissionDenied) => 5,
        Some(ErrorKind::ShareNotFound) => 6,
        Some(ErrorKind::UnexpectedHttpStatus) => 7,
        Some(ErrorKind::Connectivity) => 8,
        Some(ErrorKind::Config) => 1,
    }
}
