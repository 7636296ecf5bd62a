//! Client creation utilities for nextcloud-upload.
//!
//! This module turns CLI flags and the configuration file into the share
//! reference and the HTTP uploader used by the commands.

#![forbid(unsafe_code)]

use color_eyre::eyre::{eyre, Result};
use nextcloud_upload_lib::{ShareReference, UploadError, Uploader};
use tracing::debug;

use crate::{cli::Cli, config::Config};

/// Picks the share URL, flag first, then config file.
///
/// # Errors
///
/// Returns an error if neither source provides one.
pub fn share_url<'a>(cli: &'a Cli, config: &'a Config) -> Result<&'a str> {
    cli.share_url
        .as_deref()
        .or(config.share.url.as_deref())
        .ok_or_else(|| eyre!("no share URL given: pass --share-url or set share.url in the config file"))
}

/// Resolves the share with the password from the flag or the config file.
///
/// # Errors
///
/// Returns [`UploadError::InvalidShareUrl`] if the URL has no `/s/TOKEN` segment.
pub fn resolve_share(url: &str, cli: &Cli, config: &Config) -> Result<ShareReference, UploadError> {
    let password = cli.password.clone().or_else(|| config.share.password.clone());
    let share = ShareReference::resolve(url, password)?;
    debug!("Share: {share:?}");
    Ok(share)
}

/// Creates the HTTP uploader for this invocation.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the client cannot be built.
pub fn create_uploader(cli: &Cli, config: &Config) -> Result<Uploader> {
    let uploader_config = config.uploader_config(cli.timeout);
    debug!("Uploader config: {uploader_config:?}");
    Ok(Uploader::new(&uploader_config)?)
}
