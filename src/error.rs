//! Error types for the log reader library.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for log source operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors when opening or reading log files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The installation discovery pattern could not be compiled.
    #[error("Log discovery pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// No game installation with log files exists under the documents root.
    #[error("Found no suitable logs folder under {}", root.display())]
    NoInstallation { root: PathBuf },

    /// The caller-supplied log file path does not exist.
    #[error("No such log file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The platform documents directory could not be determined.
    #[error("Could not locate the user documents directory")]
    DocumentsDir,
}

/// A convenient Result type for log source operations.
pub type Result<T> = std::result::Result<T, Error>;
