//! Background rotation keeping the live handle on the correct file.

use crate::file::{LogFile, OpenMode};
use crate::paths::{LogPaths, Variant};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tracing::debug;

/// Interval between rotation checks.
pub(crate) const ROTATION_INTERVAL: Duration = Duration::from_secs(15);

/// Shared slot holding the currently open file, if any.
pub(crate) type HandleSlot = Arc<Mutex<Option<LogFile>>>;

/// Cell reporting the path currently being read or waited on.
pub(crate) type CurrentPath = Arc<parking_lot::Mutex<PathBuf>>;

/// Periodic task that performs the initial tail-mode open and then keeps
/// the handle pointed at the right file: the game may switch between the
/// base-game and NGS directories at any time, and starts a new file at UTC
/// midnight.
///
/// `today` supplies the current UTC date; production passes
/// [`crate::paths::utc_date`].
pub(crate) async fn rotation_task<F>(
    paths: LogPaths,
    mut date: String,
    initial: PathBuf,
    slot: HandleSlot,
    current: CurrentPath,
    mut shutdown: broadcast::Receiver<()>,
    today: F,
) where
    F: Fn() -> String + Send,
{
    let mut open_path = initial;
    if !reopen(&open_path, &slot, &current, &mut shutdown).await {
        return;
    }

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = tokio::time::sleep(ROTATION_INTERVAL) => {}
        }

        // The player may have moved between the base game and NGS.
        let desired = paths.resolve(&date);
        if desired != open_path {
            debug!(
                from = %open_path.display(),
                to = %desired.display(),
                "log variant changed; reopening"
            );
            if !reopen(&desired, &slot, &current, &mut shutdown).await {
                break;
            }
            open_path = desired;
        }

        // A new file starts at UTC midnight.
        let now = today();
        if date_advanced(&date, &now) {
            date = now;
            let rolled = paths.candidate(Variant::Base, &date);
            debug!(to = %rolled.display(), "UTC date advanced; reopening");
            if !reopen(&rolled, &slot, &current, &mut shutdown).await {
                break;
            }
            open_path = rolled;
        }
    }
}

/// True once `now` has moved past the day the current file was opened for.
/// Lexicographic comparison is exact for fixed-width `YYYYMMDD`.
fn date_advanced(stored: &str, now: &str) -> bool {
    now > stored
}

/// Opens `path` in tail mode and installs it as the active handle, fully
/// replacing the previous one (descriptor released, framer reset). The old
/// handle stays readable until the swap, and the slot lock is only held for
/// the swap itself. Returns false when shut down mid-retry.
async fn reopen(
    path: &Path,
    slot: &HandleSlot,
    current: &CurrentPath,
    shutdown: &mut broadcast::Receiver<()>,
) -> bool {
    *current.lock() = path.to_path_buf();
    let Some(file) = LogFile::open_with_retry(path, OpenMode::Tail, shutdown).await else {
        return false;
    };
    *slot.lock().await = Some(file);
    true
}
