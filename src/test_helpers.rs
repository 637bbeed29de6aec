//! Test utilities for building UTF-16BE log fixtures and fake game
//! installation trees.

use crate::framing::LINE_TERMINATOR;
use crate::paths::Variant;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Encodes `text` as UTF-16BE bytes, no terminator.
pub fn encode_utf16be(text: &str) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect()
}

/// One complete record: UTF-16BE text plus the 4-byte terminator.
pub fn record(text: &str) -> Vec<u8> {
    let mut bytes = encode_utf16be(text);
    bytes.extend(LINE_TERMINATOR);
    bytes
}

/// A complete log file image: byte-order mark followed by one record per
/// line.
pub fn bom_file_bytes(lines: &[&str]) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for line in lines {
        bytes.extend(record(line));
    }
    bytes
}

/// Sets a file's modification time, for deterministic arbitration tests.
pub fn set_mtime(path: &Path, time: SystemTime) {
    let file = OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(time).unwrap();
}

/// A temporary documents folder containing one game installation with both
/// variant directories.
pub struct TempInstall {
    documents: tempfile::TempDir,
    install_root: PathBuf,
}

impl TempInstall {
    pub fn new() -> std::io::Result<Self> {
        let documents = tempfile::tempdir()?;
        let install_root = documents.path().join("SEGA").join("PHANTASYSTARONLINE2");
        fs::create_dir_all(install_root.join(Variant::Base.dir_name()))?;
        fs::create_dir_all(install_root.join(Variant::Ngs.dir_name()))?;

        Ok(Self {
            documents,
            install_root,
        })
    }

    pub fn documents(&self) -> &Path {
        self.documents.path()
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Adds a second installation directory next to the default one and
    /// returns its root.
    pub fn add_install(&self, name: &str) -> PathBuf {
        let root = self.documents.path().join("SEGA").join(name);
        fs::create_dir_all(root.join(Variant::Base.dir_name())).unwrap();
        fs::create_dir_all(root.join(Variant::Ngs.dir_name())).unwrap();
        root
    }

    /// Creates an empty placeholder log file, enough for discovery.
    pub fn seed(&self, variant: Variant, category: &str, date: &str) -> PathBuf {
        self.write_bytes(variant, category, date, &[])
    }

    /// Creates a log file containing a byte-order mark and `lines`.
    pub fn write_log(
        &self,
        variant: Variant,
        category: &str,
        date: &str,
        lines: &[&str],
    ) -> PathBuf {
        self.write_bytes(variant, category, date, &bom_file_bytes(lines))
    }

    /// Appends one complete record to an existing log file.
    pub fn append_record(&self, path: &Path, text: &str) {
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(&record(text)).unwrap();
        file.flush().unwrap();
    }

    fn write_bytes(&self, variant: Variant, category: &str, date: &str, bytes: &[u8]) -> PathBuf {
        let path = self
            .install_root
            .join(variant.dir_name())
            .join(format!("{category}{date}_00.txt"));
        fs::write(&path, bytes).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_utf16be_ascii() {
        assert_eq!(encode_utf16be("hi"), vec![0x00, 0x68, 0x00, 0x69]);
    }

    #[test]
    fn test_record_appends_terminator() {
        assert_eq!(
            record("hi"),
            vec![0x00, 0x68, 0x00, 0x69, 0x00, 0x0D, 0x00, 0x0A]
        );
    }

    #[test]
    fn test_bom_file_bytes_layout() {
        let bytes = bom_file_bytes(&["hi"]);
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(&bytes[2..], record("hi").as_slice());
    }

    #[test]
    fn test_temp_install_layout() {
        let install = TempInstall::new().unwrap();
        assert!(install.install_root().join("log").is_dir());
        assert!(install.install_root().join("log_ngs").is_dir());
    }

    #[test]
    fn test_write_log_and_append() {
        let install = TempInstall::new().unwrap();
        let path = install.write_log(Variant::Base, "ChatLog", "20240101", &["one"]);
        install.append_record(&path, "two");

        let content = fs::read(&path).unwrap();
        assert_eq!(content, bom_file_bytes(&["one", "two"]));
    }

    #[test]
    fn test_set_mtime_is_observable() {
        let install = TempInstall::new().unwrap();
        let path = install.seed(Variant::Base, "ChatLog", "20240101");
        let past = SystemTime::now() - std::time::Duration::from_secs(86400);
        set_mtime(&path, past);

        let observed = fs::metadata(&path).unwrap().modified().unwrap();
        let diff = past
            .duration_since(observed)
            .unwrap_or_else(|e| e.duration());
        assert!(diff < std::time::Duration::from_secs(2));
    }
}
