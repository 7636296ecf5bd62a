// This is extremely safe, it says so right here!
#![forbid(unsafe_code)]

use crate::error::UploadError;

/// Result of one test-connection or upload run.
///
/// Built once when the request finished (or could not be issued) and never
/// changed afterwards.
#[derive(Debug)]
pub struct UploadOutcome {
    http_status: Option<u16>,
    bytes_sent: Option<u64>,
    message: String,
    error: Option<UploadError>,
}

impl UploadOutcome {
    pub(crate) fn succeeded(http_status: u16, bytes_sent: Option<u64>, message: &str) -> Self {
        Self {
            http_status: Some(http_status),
            bytes_sent,
            message: message.to_string(),
            error: None,
        }
    }

    pub(crate) fn failed(
        error: UploadError,
        http_status: Option<u16>,
        bytes_sent: Option<u64>,
    ) -> Self {
        Self {
            http_status,
            bytes_sent,
            message: error.to_string(),
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Status of the HTTP response; `None` when no response was received.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Bytes of the local file handed to the transport, for uploads.
    #[must_use]
    pub const fn bytes_sent(&self) -> Option<u64> {
        self.bytes_sent
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The classified failure, `None` on success.
    #[must_use]
    pub const fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    /// Converts into a `Result`, for callers that prefer `?`.
    ///
    /// # Errors
    /// Returns the classified failure if the run did not succeed.
    pub fn into_result(self) -> Result<Self, UploadError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_success() {
        let outcome = UploadOutcome::succeeded(201, Some(42), "upload succeeded");
        assert!(outcome.is_success());
        assert_eq!(outcome.http_status(), Some(201));
        assert_eq!(outcome.bytes_sent(), Some(42));
        assert_eq!(outcome.message(), "upload succeeded");
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_failure_message_comes_from_error() {
        let outcome = UploadOutcome::failed(UploadError::UnexpectedHttpStatus(500), Some(500), None);
        assert!(!outcome.is_success());
        assert!(outcome.message().contains("500"));
        let err = outcome.into_result().expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::UnexpectedHttpStatus);
    }
}
