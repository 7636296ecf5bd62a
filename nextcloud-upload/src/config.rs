//! Configuration loading for nextcloud-upload.

#![forbid(unsafe_code)]

use std::{path::Path, time::Duration};

use nextcloud_upload_lib::{UploadError, UploaderConfig, DEFAULT_CHUNK_SIZE};
use securefmt::Debug;
use serde::{Deserialize, Serialize};

/// nextcloud-upload configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Share to upload to.
    #[serde(default)]
    pub share: ShareConfig,
    /// HTTP and streaming settings.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Share URL and credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    /// Public share URL.
    pub url: Option<String>,
    /// Share password.
    #[sensitive]
    pub password: Option<String>,
}

/// Transfer settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Overall request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Bytes read from the local file at once.
    pub chunk_size: Option<usize>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, UploadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UploadError::Config(format!("failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| UploadError::Config(format!("failed to parse config: {e}")))
    }

    /// Uploader settings, with `timeout_override` (seconds) taking
    /// precedence over the file.
    #[must_use]
    pub fn uploader_config(&self, timeout_override: Option<u64>) -> UploaderConfig {
        UploaderConfig {
            timeout: timeout_override
                .or(self.upload.timeout_secs)
                .map(Duration::from_secs),
            connect_timeout: self.upload.connect_timeout_secs.map(Duration::from_secs),
            chunk_size: self.upload.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        }
    }
}
