// This is extremely safe, it says so right here!
#![forbid(unsafe_code)]

use securefmt::Debug;
use tracing::debug;
use url::Url;

use crate::{error::UploadError, helpers::PUBLIC_WEBDAV_PATH};

/// A public share parsed from its URL.
///
/// `origin` is scheme, host, optional port and the instance sub-path
/// (e.g. `/nextcloud`), never with a trailing slash. `token` is the
/// path segment after `/s/`, kept byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareReference {
    origin: String,
    token: String,
    #[sensitive]
    password: Option<String>,
}

impl ShareReference {
    /// Parses a share URL such as `https://cloud.example.com/s/TOKEN` or
    /// `https://cloud.example.com/nextcloud/s/TOKEN`.
    ///
    /// Anything after the token, as well as query, fragment and user info,
    /// is discarded.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidShareUrl`] if the URL does not parse or
    /// contains no `s` segment followed by a non-empty token.
    pub fn resolve(share_url: &str, password: Option<String>) -> Result<Self, UploadError> {
        let trimmed = share_url.trim();
        let mut url = Url::parse(trimmed)
            .map_err(|e| UploadError::invalid_share_url(trimmed, e.to_string()))?;

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(UploadError::invalid_share_url(trimmed, "URL has no host"));
        }

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default();

        let (prefix, token) = segments
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[0] == "s" && !pair[1].is_empty())
            .map(|(index, pair)| (&segments[..index], pair[1].clone()))
            .ok_or_else(|| UploadError::invalid_share_url(trimmed, "no /s/TOKEN segment"))?;

        let prefix: Vec<&str> = prefix
            .iter()
            .map(String::as_str)
            .filter(|segment| !segment.is_empty())
            .collect();

        url.set_query(None);
        url.set_fragment(None);
        // Only fails for URLs without a host, rejected above.
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.set_path(&prefix.join("/"));

        let origin = url.as_str().trim_end_matches('/').to_string();

        debug!("Resolved share token {token} on {origin}");

        Ok(Self {
            origin,
            token,
            password,
        })
    }

    /// Instance origin including any sub-path, without trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Share token, used as the Basic-Auth user name.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Share password, if one was supplied.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The public WebDAV collection of this share, with trailing slash.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidShareUrl`] if the origin cannot be joined.
    pub fn webdav_root(&self) -> Result<Url, UploadError> {
        let root = format!("{}/{PUBLIC_WEBDAV_PATH}", self.origin);
        Url::parse(&root).map_err(|e| UploadError::invalid_share_url(&self.origin, e.to_string()))
    }

    /// URL of `remote_name` inside the share, percent-encoded as a single
    /// path segment.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidRemoteName`] if the name is empty, is
    /// `.` or `..`, or contains `/` or `\`.
    pub fn webdav_file_url(&self, remote_name: &str) -> Result<Url, UploadError> {
        validate_remote_name(remote_name)?;

        let mut url = self.webdav_root()?;
        url.path_segments_mut()
            .map_err(|()| UploadError::invalid_share_url(&self.origin, "cannot append path"))?
            .pop_if_empty()
            .push(remote_name);
        Ok(url)
    }
}

/// Rejects names that would create or escape into sub-directories.
fn validate_remote_name(name: &str) -> Result<(), UploadError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(UploadError::InvalidRemoteName(name.to_string()));
    }
    Ok(())
}
