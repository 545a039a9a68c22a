//! Destinations for generated files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::Error;

/// Receives fully assembled generated files, one call per file.
pub trait FileWriter {
    /// Write `contents` to `path`, replacing any previous contents.
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), Error>;
}

/// Writes files to disk, creating parent directories on demand.
#[derive(Debug, Default)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

impl FileWriter for FsWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), Error> {
        let to_error = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(to_error)?;
            }
        }
        std::fs::write(path, contents).map_err(to_error)
    }
}

/// Keeps generated files in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents written to `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All written files, ordered by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileWriter for MemoryWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), Error> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fs_writer_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Models/Nested/User.ts");

        FsWriter::new().write(&path, "export interface User {}\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export interface User {}\n"
        );
    }

    #[test]
    fn test_fs_writer_reports_path_on_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let err = FsWriter::new()
            .write(&blocker.join("User.ts"), "")
            .unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_memory_writer_replaces_contents() {
        let mut writer = MemoryWriter::new();
        writer.write(Path::new("a.ts"), "one").unwrap();
        writer.write(Path::new("a.ts"), "two").unwrap();

        assert_eq!(writer.len(), 1);
        assert_eq!(writer.get("a.ts"), Some("two"));
    }
}
