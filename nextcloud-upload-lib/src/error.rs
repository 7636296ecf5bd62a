//! Error types for share uploads.
//!
//! Every failure an invocation can run into is classified here, so the
//! caller can pick an exit status and a message without inspecting
//! transport internals.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors that can occur while resolving a share or uploading to it.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The share URL has no `/s/<token>` segment or is not a URL at all.
    #[error(
        "invalid share URL '{url}': {reason} (expected https://host/s/TOKEN or https://host/nextcloud/s/TOKEN)"
    )]
    InvalidShareUrl {
        /// The URL as supplied by the user.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The remote file name would escape the share root or is empty.
    #[error("invalid remote name '{0}': must be a plain file name without path separators")]
    InvalidRemoteName(String),

    /// The local path is missing, not a regular file, or not readable.
    #[error("file not found: {0}")]
    LocalFileNotFound(String),

    /// HTTP 401.
    #[error("authentication failed: wrong or missing share password, or invalid share token")]
    AuthenticationFailed,

    /// HTTP 403.
    #[error("permission denied: the share is read-only or does not allow uploads")]
    PermissionDenied,

    /// HTTP 404.
    #[error("share not found: the share token does not exist or has expired")]
    ShareNotFound,

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {0}")]
    UnexpectedHttpStatus(u16),

    /// Transport failure before a status was available (DNS, TLS, timeout, reset).
    #[error("connection error: {0}")]
    Connectivity(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Payload-free classification of an [`UploadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidShareUrl,
    InvalidRemoteName,
    LocalFileNotFound,
    AuthenticationFailed,
    PermissionDenied,
    ShareNotFound,
    UnexpectedHttpStatus,
    Connectivity,
    Config,
}

impl UploadError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShareUrl { .. } => ErrorKind::InvalidShareUrl,
            Self::InvalidRemoteName(_) => ErrorKind::InvalidRemoteName,
            Self::LocalFileNotFound(_) => ErrorKind::LocalFileNotFound,
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            Self::PermissionDenied => ErrorKind::PermissionDenied,
            Self::ShareNotFound => ErrorKind::ShareNotFound,
            Self::UnexpectedHttpStatus(_) => ErrorKind::UnexpectedHttpStatus,
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Maps a non-2xx HTTP status to its failure category.
    ///
    /// Returns `None` for success statuses.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::AuthenticationFailed),
            403 => Some(Self::PermissionDenied),
            404 => Some(Self::ShareNotFound),
            other => Some(Self::UnexpectedHttpStatus(other)),
        }
    }

    pub(crate) fn invalid_share_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidShareUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's own message omits the root cause (e.g. "connection refused").
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Connectivity(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(UploadError::from_status(200).is_none());
        assert!(UploadError::from_status(201).is_none());
        assert!(UploadError::from_status(204).is_none());
        assert!(UploadError::from_status(207).is_none());
        assert_eq!(
            UploadError::from_status(401).map(|e| e.kind()),
            Some(ErrorKind::AuthenticationFailed)
        );
        assert_eq!(
            UploadError::from_status(403).map(|e| e.kind()),
            Some(ErrorKind::PermissionDenied)
        );
        assert_eq!(
            UploadError::from_status(404).map(|e| e.kind()),
            Some(ErrorKind::ShareNotFound)
        );
    }

    #[test]
    fn test_unexpected_status_keeps_code() {
        let err = UploadError::from_status(507).expect("507 is a failure");
        assert!(matches!(err, UploadError::UnexpectedHttpStatus(507)));
        assert!(err.to_string().contains("507"));

        let err = UploadError::from_status(302).expect("302 is a failure");
        assert!(matches!(err, UploadError::UnexpectedHttpStatus(302)));
    }

    #[test]
    fn test_invalid_share_url_message_names_formats() {
        let err = UploadError::invalid_share_url("https://x", "missing /s/ segment");
        let message = err.to_string();
        assert!(message.contains("/s/TOKEN"));
        assert!(message.contains("/nextcloud/s/TOKEN"));
    }
}
