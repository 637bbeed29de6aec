//! A log reader library for PSO2 (NGS) that provides decoded lines from the
//! game's UTF-16BE log files.
//!
//! Live mode follows the most recent log file of a category and keeps the
//! stream continuous across the hassles these files bring: records appended
//! a few bytes at a time, line feeds sent inside chat messages, byte order
//! markers, files that only appear once the game logs something, the new
//! file started at UTC midnight, and the hop between the base-game and NGS
//! log directories. One-shot mode reads a complete log file from disk once.
//!
//! # Example
//!
//! ```rust,no_run
//! use ngs_log_reader::watch_live;
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = watch_live("ChatLog", None).await?;
//!
//!     while let Some(lines) = stream.next().await {
//!         for line in lines {
//!             println!("{}", line);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For polling without a stream, use [`LogSource`] directly:
//!
//! ```rust,no_run
//! use ngs_log_reader::LogSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = LogSource::open_path("message.txt").await?;
//!     for line in source.poll().await {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod error;
mod file;
mod framing;
mod paths;
mod rotation;
mod source;
mod stream;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use error::{Error, Result};
pub use source::LogSource;
pub use stream::LineStream;

use std::path::Path;
use std::time::Duration;
use stream::DEFAULT_POLL_INTERVAL;

/// Creates a stream that follows the most recent log file of `category`,
/// yielding each non-empty batch of new lines.
///
/// # Arguments
///
/// * `category` - Log category to follow, e.g. `"ChatLog"` or `"ActionLog"`
/// * `poll_interval` - How often to poll for new lines (defaults to 1 s)
pub async fn watch_live(
    category: &str,
    poll_interval: Option<Duration>,
) -> Result<LineStream> {
    let source = LogSource::open_live(category).await?;
    Ok(LineStream::new(
        source,
        poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
    ))
}

/// Creates a stream over a specific log file, read once from the start.
///
/// Fails immediately if `path` does not exist.
pub async fn watch_path<P: AsRef<Path>>(
    path: P,
    poll_interval: Option<Duration>,
) -> Result<LineStream> {
    let source = LogSource::open_path(path).await?;
    Ok(LineStream::new(
        source,
        poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
    ))
}
