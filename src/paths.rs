//! Resolution of the log file path the game should currently be writing.

use crate::error::{Error, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One of the two sibling directories that may hold the active log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    /// `log`, the base game. The default whenever arbitration has nothing
    /// to go on.
    Base,
    /// `log_ngs`, New Genesis.
    Ngs,
}

impl Variant {
    pub(crate) fn dir_name(self) -> &'static str {
        match self {
            Variant::Base => "log",
            Variant::Ngs => "log_ngs",
        }
    }
}

/// Computes candidate log file paths for one category under one
/// installation, and arbitrates between the two variant directories.
#[derive(Debug, Clone)]
pub(crate) struct LogPaths {
    install_root: PathBuf,
    category: String,
}

impl LogPaths {
    /// Locates the installation whose logs were touched most recently.
    ///
    /// Several installations (and both variant directories per
    /// installation) can share one documents folder; the one with the
    /// newest log entry is the one the player is actually using.
    pub(crate) fn discover(documents: &Path, category: &str) -> Result<Self> {
        let pattern = documents
            .join("SEGA")
            .join("PHANTASYSTARONLINE2*")
            .join("log*")
            .join("*");

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let Ok(path) = entry else { continue };
            let Some(mtime) = modified(&path) else {
                continue;
            };
            if newest.as_ref().is_none_or(|(t, _)| mtime > *t) {
                newest = Some((mtime, path));
            }
        }

        let no_installation = || Error::NoInstallation {
            root: documents.to_path_buf(),
        };
        let (_, entry) = newest.ok_or_else(no_installation)?;
        // The entry is a log file inside <install>/<variant dir>.
        let install_root = entry
            .parent()
            .and_then(Path::parent)
            .ok_or_else(no_installation)?
            .to_path_buf();

        Ok(Self {
            install_root,
            category: category.to_string(),
        })
    }

    pub(crate) fn install_root(&self) -> &Path {
        &self.install_root
    }

    pub(crate) fn file_name(&self, date: &str) -> String {
        format!("{}{}_00.txt", self.category, date)
    }

    pub(crate) fn candidate(&self, variant: Variant, date: &str) -> PathBuf {
        self.install_root
            .join(variant.dir_name())
            .join(self.file_name(date))
    }

    /// Picks the candidate the game is writing for `date`: the variant with
    /// the newer file wins, ties and absences fall back to the base game.
    pub(crate) fn resolve(&self, date: &str) -> PathBuf {
        let base = self.candidate(Variant::Base, date);
        let ngs = self.candidate(Variant::Ngs, date);
        match (modified(&base), modified(&ngs)) {
            (Some(base_mtime), Some(ngs_mtime)) if ngs_mtime > base_mtime => ngs,
            (Some(_), _) => base,
            (None, Some(_)) => ngs,
            (None, None) => base,
        }
    }
}

/// Current UTC day as `YYYYMMDD`. Log files roll over at UTC midnight.
pub(crate) fn utc_date() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}
