//! The log source facade composing path resolution, the file handle, and
//! background rotation.

use crate::error::{Error, Result};
use crate::file::{LogFile, OpenMode};
use crate::framing::FrameEvent;
use crate::paths::{LogPaths, utc_date};
use crate::rotation::{CurrentPath, HandleSlot, rotation_task};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::error;

/// A continuous stream of decoded lines from one log category or file.
///
/// Live mode (`open_live`) keeps following the category across UTC date
/// rollovers and base-game/NGS directory switches; one-shot mode
/// (`open_path`) reads exactly the file it was given. Consumers drain lines
/// by calling [`LogSource::poll`].
pub struct LogSource {
    slot: HandleSlot,
    current: CurrentPath,
    install_root: Option<PathBuf>,
    shutdown_tx: broadcast::Sender<()>,
    _monitor: Option<JoinHandle<()>>,
}

impl LogSource {
    /// Opens the most recent log file of `category` for live tailing, using
    /// the platform documents folder as the search root.
    pub async fn open_live(category: &str) -> Result<Self> {
        let documents = dirs::document_dir().ok_or(Error::DocumentsDir)?;
        Self::open_live_in(&documents, category).await
    }

    /// Live tailing with an explicit documents root.
    ///
    /// Discovery fails immediately when no installation has logs. A missing
    /// log file for today does not fail: it is opened as soon as the game
    /// creates it, and [`LogSource::poll`] returns nothing until then.
    pub async fn open_live_in(documents: &Path, category: &str) -> Result<Self> {
        let paths = LogPaths::discover(documents, category)?;
        let date = utc_date();
        let initial = paths.resolve(&date);
        let install_root = paths.install_root().to_path_buf();

        let slot: HandleSlot = Arc::new(Mutex::new(None));
        let current: CurrentPath = Arc::new(parking_lot::Mutex::new(initial.clone()));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let monitor = tokio::spawn(rotation_task(
            paths,
            date,
            initial,
            slot.clone(),
            current.clone(),
            shutdown_rx,
            utc_date,
        ));

        Ok(Self {
            slot,
            current,
            install_root: Some(install_root),
            shutdown_tx,
            _monitor: Some(monitor),
        })
    }

    /// Opens `path` for a one-shot read of an already complete file.
    ///
    /// Unlike live mode there is no waiting: the caller supplied an exact
    /// path they expect to exist, so a missing file fails immediately.
    pub async fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = LogFile::open(path, OpenMode::Full).await?;
        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Self {
            slot: Arc::new(Mutex::new(Some(file))),
            current: Arc::new(parking_lot::Mutex::new(path.to_path_buf())),
            install_root: None,
            shutdown_tx,
            _monitor: None,
        })
    }

    /// Returns every line completed since the last call, in emission order.
    ///
    /// Never fails: decode errors are reported as diagnostics and the
    /// malformed record dropped, and an absent file simply yields nothing.
    pub async fn poll(&self) -> Vec<String> {
        let mut guard = self.slot.lock().await;
        let Some(file) = guard.as_mut() else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        for event in file.read_available().await {
            match event {
                FrameEvent::Line(line) => lines.push(line),
                FrameEvent::DecodeError { bytes } => {
                    error!(path = %file.path().display(), ?bytes, "unable to decode log line");
                }
            }
        }
        lines
    }

    /// The path currently being read, or waited on while the game has not
    /// created it yet. Diagnostic.
    pub fn current_path(&self) -> PathBuf {
        self.current.lock().clone()
    }

    /// The discovered installation root, in live mode.
    pub fn install_root(&self) -> Option<&Path> {
        self.install_root.as_deref()
    }
}

impl Drop for LogSource {
    fn drop(&mut self) {
        // Stops the rotation task, including an in-flight open retry.
        let _ = self.shutdown_tx.send(());
    }
}
