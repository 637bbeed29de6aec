//! Ownership of one open log file and its framing state.

use crate::error::Result;
use crate::framing::{FrameEvent, LineFramer};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::broadcast;
use tracing::warn;

/// Interval between attempts to open a file that does not exist yet.
pub(crate) const OPEN_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// How an opened file positions its read cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenMode {
    /// Seek to end-of-file; only newly appended bytes are read. Used for
    /// live tailing.
    Tail,
    /// Skip the 2-byte byte-order mark and read everything once. Used for
    /// one-shot reads of a complete file.
    Full,
}

/// One open log file descriptor plus the framer attached to it.
///
/// Replaced wholesale on rotation. Both open modes leave the cursor at a
/// position where the next byte starts a fresh code unit, so every open
/// begins with a framer in its sentinel state and no leftover bytes from a
/// previous file.
#[derive(Debug)]
pub(crate) struct LogFile {
    path: PathBuf,
    file: File,
    framer: LineFramer,
}

impl LogFile {
    /// Single open attempt.
    pub(crate) async fn open(path: &Path, mode: OpenMode) -> Result<Self> {
        let mut file = File::open(path).await?;
        match mode {
            OpenMode::Tail => {
                file.seek(SeekFrom::End(0)).await?;
            }
            OpenMode::Full => {
                let mut bom = [0u8; 2];
                let _ = file.read(&mut bom).await?;
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            framer: LineFramer::new(),
        })
    }

    /// Retries [`LogFile::open`] every second until it succeeds or the
    /// shutdown channel fires. Warns once per call rather than per attempt:
    /// the usual cause is that the game has not created the file yet, which
    /// resolves itself on its next loggable action.
    pub(crate) async fn open_with_retry(
        path: &Path,
        mode: OpenMode,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Option<Self> {
        let mut warned = false;
        loop {
            match Self::open(path, mode).await {
                Ok(file) => return Some(file),
                Err(err) => {
                    if !warned {
                        warned = true;
                        warn!(
                            path = %path.display(),
                            %err,
                            "log file not available; waiting for the game to write its next entry"
                        );
                    }
                }
            }

            tokio::select! {
                _ = shutdown.recv() => return None,
                _ = tokio::time::sleep(OPEN_RETRY_INTERVAL) => {}
            }
        }
    }

    /// Drains every byte currently available and returns the framing events
    /// they produced. Returns an empty vec when the file has not grown.
    ///
    /// Read errors end the drain and are reported as diagnostics; events
    /// completed before the error are still returned.
    pub(crate) async fn read_available(&mut self) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match self.file.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    for &byte in &chunk[..n] {
                        if let Some(event) = self.framer.feed(byte) {
                            events.push(event);
                        }
                    }
                }
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "error while reading log file");
                    break;
                }
            }
        }
        events
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
