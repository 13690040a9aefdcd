//! Staging-area filesystem collaborator
//!
//! The staging area is the working-directory tree where uploaded
//! import artifacts are stored pending further processing. Callers
//! address files by a handle relative to the staging root, so a test
//! double or an alternate root can be injected without touching the
//! pipeline code.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem collaborator for the import staging directory
///
/// Implementations must guarantee that a successful `write_file` is
/// all-or-nothing: a reader never observes a partially written file
/// under the returned relative path.
pub trait StagingArea: Send + Sync {
    /// Absolute path of the staging root
    fn root(&self) -> &Path;

    /// Write `bytes` under `relative`, atomically
    fn write_file(&self, relative: &str, bytes: &[u8]) -> Result<()>;

    /// Read the full content of the file at `relative`
    fn read_file(&self, relative: &str) -> Result<Vec<u8>>;

    /// Delete the file at `relative`
    fn delete_file(&self, relative: &str) -> Result<()>;
}

/// Production staging area rooted at `<root_folder>/import`
#[derive(Debug, Clone)]
pub struct VarStaging {
    root: PathBuf,
}

impl VarStaging {
    /// Subdirectory of the root folder holding import sources
    pub const IMPORT_DIR: &'static str = "import";

    /// Create a staging area under `root_folder`, creating the
    /// directory tree if missing
    pub fn create(root_folder: &Path) -> Result<Self> {
        let root = root_folder.join(Self::IMPORT_DIR);
        std::fs::create_dir_all(&root).map_err(|e| {
            Error::Config(format!(
                "Failed to create staging directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    fn absolute(&self, relative: &str) -> Result<PathBuf> {
        // Handles are plain file names; reject anything that could
        // escape the staging root.
        if relative.is_empty()
            || relative.contains('/')
            || relative.contains('\\')
            || relative.contains("..")
        {
            return Err(Error::InvalidInput(format!(
                "Invalid staging handle: {}",
                relative
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl StagingArea for VarStaging {
    fn root(&self) -> &Path {
        &self.root
    }

    fn write_file(&self, relative: &str, bytes: &[u8]) -> Result<()> {
        let dest = self.absolute(relative)?;

        // Write to a unique temp name, then rename into place. Rename
        // is atomic within a directory, so concurrent writers of the
        // same handle race to an identical final state.
        let tmp = self.root.join(format!(".{}.tmp-{}", relative, Uuid::new_v4()));
        std::fs::write(&tmp, bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &dest) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::Io(e));
        }

        tracing::debug!(
            handle = %relative,
            bytes = bytes.len(),
            "Staged import source file"
        );
        Ok(())
    }

    fn read_file(&self, relative: &str) -> Result<Vec<u8>> {
        let path = self.absolute(relative)?;
        Ok(std::fs::read(path)?)
    }

    fn delete_file(&self, relative: &str) -> Result<()> {
        let path = self.absolute(relative)?;
        Ok(std::fs::remove_file(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staging() -> (tempfile::TempDir, VarStaging) {
        let dir = tempfile::tempdir().unwrap();
        let staging = VarStaging::create(dir.path()).unwrap();
        (dir, staging)
    }

    #[test]
    fn create_makes_import_subdirectory() {
        let (dir, staging) = staging();
        assert_eq!(staging.root(), dir.path().join("import"));
        assert!(staging.root().is_dir());
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, staging) = staging();
        let payload = b"ABCDEFGHabcdefgh0123456789";
        staging.write_file("data.csv", payload).unwrap();
        assert_eq!(staging.read_file("data.csv").unwrap(), payload);
    }

    #[test]
    fn write_handles_empty_and_binary_content() {
        let (_dir, staging) = staging();
        staging.write_file("empty.bin", &[]).unwrap();
        assert_eq!(staging.read_file("empty.bin").unwrap(), Vec::<u8>::new());

        let binary: Vec<u8> = (0u8..=255).collect();
        staging.write_file("bytes.bin", &binary).unwrap();
        assert_eq!(staging.read_file("bytes.bin").unwrap(), binary);
    }

    #[test]
    fn rewrite_of_same_handle_is_clean() {
        let (_dir, staging) = staging();
        staging.write_file("data.csv", b"first").unwrap();
        staging.write_file("data.csv", b"first").unwrap();
        assert_eq!(staging.read_file("data.csv").unwrap(), b"first");
    }

    #[test]
    fn delete_removes_file() {
        let (_dir, staging) = staging();
        staging.write_file("gone.csv", b"x").unwrap();
        staging.delete_file("gone.csv").unwrap();
        assert!(staging.read_file("gone.csv").is_err());
    }

    #[test]
    fn path_traversal_handles_are_rejected() {
        let (_dir, staging) = staging();
        assert!(staging.write_file("../escape.csv", b"x").is_err());
        assert!(staging.read_file("a/b.csv").is_err());
        assert!(staging.delete_file("").is_err());
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (_dir, staging) = staging();
        staging.write_file("data.csv", b"payload").unwrap();
        let entries: Vec<_> = std::fs::read_dir(staging.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["data.csv".to_string()]);
    }
}
