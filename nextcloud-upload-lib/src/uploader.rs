// This is extremely safe, it says so right here!
#![forbid(unsafe_code)]

use std::{
    fs,
    path::Path,
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use base64::prelude::*;
use reqwest::{
    blocking::{Body, Client, Response},
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use tracing::{debug, info, warn};

use crate::{
    error::UploadError,
    helpers::{DEFAULT_CHUNK_SIZE, OCTET_STREAM, USER_AGENT},
    outcome::UploadOutcome,
    progress::{ProgressObserver, ProgressReader},
    share::ShareReference,
};

const UPLOAD_SUCCEEDED: &str = "upload succeeded";
const CONNECTION_SUCCEEDED: &str = "connection succeeded";

/// Settings for the HTTP client and body streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// TCP/TLS connect timeout. `None` uses the client default.
    pub connect_timeout: Option<Duration>,
    /// Maximum number of bytes read from the file at once.
    pub chunk_size: usize,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Talks to the public WebDAV endpoint of a share.
///
/// One instance per invocation; it owns its HTTP client and performs
/// exactly one request per call, without retries.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: Client,
    chunk_size: usize,
}

impl Uploader {
    /// Builds the HTTP client from `config`.
    ///
    /// # Errors
    /// Returns [`UploadError::Config`] if the chunk size is zero or the
    /// client cannot be constructed.
    pub fn new(config: &UploaderConfig) -> Result<Self, UploadError> {
        if config.chunk_size == 0 {
            return Err(UploadError::Config("chunk size must be greater than zero".into()));
        }

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout);
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UploadError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            chunk_size: config.chunk_size,
        })
    }

    /// Probes the share root with a `PROPFIND` (`Depth: 0`).
    ///
    /// Checks reachability and credentials; nothing on the server is
    /// created or modified.
    pub fn test_connection(&self, share: &ShareReference) -> UploadOutcome {
        self.try_test_connection(share)
            .unwrap_or_else(|error| UploadOutcome::failed(error, None, None))
    }

    fn try_test_connection(&self, share: &ShareReference) -> Result<UploadOutcome, UploadError> {
        let root = share.webdav_root()?;
        let propfind = Method::from_bytes(b"PROPFIND")
            .map_err(|e| UploadError::Config(format!("invalid HTTP method: {e}")))?;

        info!("Testing connection to share");
        debug!("PROPFIND {root}");

        let result = self
            .client
            .request(propfind, root)
            .header(AUTHORIZATION, authorization(share)?)
            .header("Depth", "0")
            .send();

        Ok(match result {
            Ok(response) => interpret(response, None, CONNECTION_SUCCEEDED),
            Err(e) => {
                warn!("Connection test failed: {e}");
                UploadOutcome::failed(e.into(), None, None)
            }
        })
    }

    /// Uploads `local_path` into the share with a streaming `PUT`.
    ///
    /// The remote file is named `remote_name`, or the local base name when
    /// none is given. The file is read `chunk_size` bytes at a time and
    /// every read is reported to `observer` as a cumulative byte count.
    ///
    /// Local problems (missing file, bad remote name) are reported before
    /// any request is made.
    pub fn upload_file(
        &self,
        share: &ShareReference,
        local_path: &Path,
        remote_name: Option<&str>,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> UploadOutcome {
        self.try_upload_file(share, local_path, remote_name, observer)
            .unwrap_or_else(|error| UploadOutcome::failed(error, None, None))
    }

    fn try_upload_file(
        &self,
        share: &ShareReference,
        local_path: &Path,
        remote_name: Option<&str>,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<UploadOutcome, UploadError> {
        let not_found = || UploadError::LocalFileNotFound(local_path.display().to_string());

        let metadata = fs::metadata(local_path).map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        let target_name = match remote_name {
            Some(name) => name.to_string(),
            None => local_path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    UploadError::InvalidRemoteName(local_path.to_string_lossy().into_owned())
                })?,
        };
        let url = share.webdav_file_url(&target_name)?;
        let authorization = authorization(share)?;

        // Closed when the body is dropped, on every path out of `send`.
        let file = fs::File::open(local_path).map_err(|e| {
            UploadError::LocalFileNotFound(format!("{}: {e}", local_path.display()))
        })?;
        let total = metadata.len();

        info!("Uploading {} to {target_name}", local_path.display());
        debug!("PUT {url} ({total} bytes)");

        let reader = ProgressReader::new(file, self.chunk_size, total, observer.clone());
        let counter = reader.counter();

        let result = self
            .client
            .put(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(Body::sized(reader, total))
            .send();

        let sent = counter.load(Ordering::Relaxed);
        if let Some(observer) = &observer {
            observer.on_finish(sent);
        }

        Ok(match result {
            Ok(response) => interpret(response, Some(sent), UPLOAD_SUCCEEDED),
            Err(e) => {
                warn!("Upload of {target_name} failed: {e}");
                UploadOutcome::failed(e.into(), None, Some(sent))
            }
        })
    }
}

/// `Basic base64(token:password)`, with an empty password when none is set.
fn authorization(share: &ShareReference) -> Result<HeaderValue, UploadError> {
    let credentials = format!("{}:{}", share.token(), share.password().unwrap_or_default());
    let mut value = HeaderValue::from_str(&format!("Basic {}", BASE64_STANDARD.encode(credentials)))
        .map_err(|e| UploadError::Config(format!("invalid credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn interpret(response: Response, bytes_sent: Option<u64>, success: &str) -> UploadOutcome {
    let status = response.status().as_u16();
    match UploadError::from_status(status) {
        None => {
            info!("{success} (HTTP {status})");
            UploadOutcome::succeeded(status, bytes_sent, success)
        }
        Some(error) => {
            let body = response.text().unwrap_or_default();
            warn!("Request failed with status {status}");
            debug!("Response body: {body}");
            UploadOutcome::failed(error, Some(status), bytes_sent)
        }
    }
}
