// This is extremely safe, it says so right here!
#![forbid(unsafe_code)]

use std::{
    io::{self, Read},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// Receives upload progress.
///
/// Called from the thread that feeds the request body, so implementations
/// must be `Send + Sync`.
pub trait ProgressObserver: Send + Sync {
    /// `sent` is the cumulative number of bytes read from the file so far.
    fn on_progress(&self, sent: u64, total: u64);

    /// Called once after the request completed, successfully or not.
    fn on_finish(&self, _sent: u64) {}
}

/// Wraps the local file so every read is capped at `chunk_size` and
/// reported to the observer.
pub(crate) struct ProgressReader<R> {
    inner: R,
    chunk_size: usize,
    total: u64,
    sent: Arc<AtomicU64>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl<R: Read> ProgressReader<R> {
    pub(crate) fn new(
        inner: R,
        chunk_size: usize,
        total: u64,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Self {
        Self {
            inner,
            chunk_size,
            total,
            sent: Arc::new(AtomicU64::new(0)),
            observer,
        }
    }

    /// Shared counter of bytes handed to the HTTP client.
    pub(crate) fn counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.sent)
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(self.chunk_size);
        let read = self.inner.read(&mut buf[..limit])?;
        if read > 0 {
            let sent = self.sent.fetch_add(read as u64, Ordering::Relaxed) + read as u64;
            if let Some(observer) = &self.observer {
                observer.on_progress(sent, self.total);
            }
        }
        Ok(read)
    }
}
