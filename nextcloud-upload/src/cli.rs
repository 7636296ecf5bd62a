//! CLI argument parsing for nextcloud-upload.
//!
//! This module defines the command-line interface using clap.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use securefmt::Debug;

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "nextcloud-upload",
    author,
    version,
    about = "Upload files to Nextcloud public shares via WebDAV",
    after_help = "Examples:\n  \
        nextcloud-upload -u https://cloud.example.com/s/TOKEN -f document.pdf\n  \
        nextcloud-upload -u https://cloud.example.com/s/TOKEN -f file.txt -p secret\n  \
        nextcloud-upload -u https://cloud.example.com/s/TOKEN -f local.txt -n remote.txt\n  \
        nextcloud-upload -u https://cloud.example.com/s/TOKEN -t"
)]
pub struct Cli {
    /// Nextcloud public share URL (e.g., https://cloud.example.com/s/TOKEN).
    #[arg(short = 'u', long, value_name = "URL")]
    pub share_url: Option<String>,

    /// Path to the file to upload.
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "test_connection"
    )]
    pub file: Option<PathBuf>,

    /// Password for password-protected shares.
    #[arg(short, long)]
    #[sensitive]
    pub password: Option<String>,

    /// Remote filename (defaults to the local filename).
    #[arg(short = 'n', long, value_name = "NAME")]
    pub remote_name: Option<String>,

    /// Test the connection to the share without uploading.
    #[arg(short, long)]
    pub test_connection: bool,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Overall request timeout in seconds (no timeout by default).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
