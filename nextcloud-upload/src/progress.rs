//! Terminal progress bar for uploads.

#![forbid(unsafe_code)]

use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use nextcloud_upload_lib::ProgressObserver;

const TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({binary_bytes_per_sec}, {eta})";

/// Byte progress bar fed by the uploader.
pub struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    /// Creates a bar labelled with `name` for a file of `total` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bar template is invalid.
    pub fn new(name: &str, total: u64) -> Result<Self> {
        let style = ProgressStyle::with_template(TEMPLATE)?.progress_chars("=> ");
        let bar = ProgressBar::new(total).with_style(style);
        bar.set_message(name.to_string());
        Ok(Self { bar })
    }
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, sent: u64, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(sent);
    }

    fn on_finish(&self, _sent: u64) {
        self.bar.finish();
    }
}
