//! Stream adapter that polls a log source from a background task.

use crate::source::LogSource;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Poll cadence used when the caller does not pick one.
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A stream that polls a [`LogSource`] on an interval and yields each
/// non-empty batch of decoded lines.
pub struct LineStream {
    receiver: mpsc::UnboundedReceiver<Vec<String>>,
    _shutdown_tx: broadcast::Sender<()>,
    _task_handle: JoinHandle<()>,
}

impl LineStream {
    /// Wraps `source`, polling it every `interval`.
    pub fn new(source: LogSource, interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let task_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let lines = source.poll().await;
                if !lines.is_empty() && tx.send(lines).is_err() {
                    // Receiver gone; no one is listening anymore.
                    break;
                }
            }
        });

        LineStream {
            receiver: rx,
            _shutdown_tx: shutdown_tx,
            _task_handle: task_handle,
        }
    }

    /// Check if the stream has been closed/dropped
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        // Stops the polling task; the wrapped source's own drop then stops
        // its rotation task.
        let _ = self._shutdown_tx.send(());
    }
}

impl Stream for LineStream {
    type Item = Vec<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
