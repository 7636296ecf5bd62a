//! Nextcloud Upload Library
//!
//! Uploads a single file into a Nextcloud public share over WebDAV.
//!
//! # Overview
//!
//! A public share URL (`https://host/s/TOKEN`) is resolved into the instance
//! origin and the share token. The token is the Basic-Auth user name for the
//! share's WebDAV collection at `{origin}/public.php/webdav/`, the share
//! password (or an empty string) is the password. Uploads are one streaming
//! `PUT`; the connection test is one `PROPFIND`. Either way the result is an
//! [`UploadOutcome`] carrying a classified [`UploadError`] on failure.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and HTTP status classification
//! - [`helpers`]: Constants shared by the other modules
//! - [`outcome`]: The value returned by every operation
//! - [`progress`]: Progress observer interface
//! - [`share`]: Share URL parsing and WebDAV URL construction
//! - [`uploader`]: HTTP client and the upload/test-connection operations
//!
//! # Example
//!
//! ```no_run
//! use nextcloud_upload_lib::{ShareReference, Uploader, UploaderConfig};
//! use std::path::Path;
//!
//! let share = ShareReference::resolve("https://cloud.example.com/s/TOKEN", None)?;
//! let uploader = Uploader::new(&UploaderConfig::default())?;
//! let outcome = uploader.upload_file(&share, Path::new("report.pdf"), None, None);
//! println!("{}", outcome.message());
//! # Ok::<(), nextcloud_upload_lib::UploadError>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod helpers;
pub mod outcome;
pub mod progress;
pub mod share;
pub mod uploader;


// Re-export commonly used types at the crate root
pub use error::{ErrorKind, UploadError};
pub use helpers::DEFAULT_CHUNK_SIZE;
pub use outcome::UploadOutcome;
pub use progress::ProgressObserver;
pub use share::ShareReference;
pub use uploader::{Uploader, UploaderConfig};
