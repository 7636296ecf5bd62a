// This is extremely safe, it says so right here!
#![forbid(unsafe_code)]

/// Bytes read from the local file per body chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// WebDAV collection exposed for public shares, relative to the instance origin.
pub const PUBLIC_WEBDAV_PATH: &str = "public.php/webdav/";

/// Sent with every request.
pub const USER_AGENT: &str = concat!("nextcloud-upload/", env!("CARGO_PKG_VERSION"));

pub const OCTET_STREAM: &str = "application/octet-stream";
