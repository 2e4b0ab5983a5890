//! File system access used by the stager.
//!
//! The pipeline only needs existence checks, directory creation and file
//! copies. Keeping them behind [`FileSystem`] lets hosts redirect or record
//! staging without touching disk.

use std::io;
use std::path::{Path, PathBuf};

/// File operations the stager depends on.
pub trait FileSystem {
    /// Check whether a file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check whether a directory exists.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Copy `source` to `destination`.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] when `overwrite` is false
    /// and the destination exists.
    fn copy_file(&self, source: &Path, destination: &Path, overwrite: bool) -> io::Result<()>;

    /// Format a path for log output.
    fn relative_path(&self, path: &Path) -> String {
        path.display().to_string()
    }
}

/// [`FileSystem`] backed by the local disk.
///
/// Relative paths are resolved against `root`, which is normally the
/// add-in project directory.
#[derive(Debug, Clone)]
pub struct PhysicalFs {
    root: PathBuf,
}

impl PhysicalFs {
    /// Create a file system rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystem for PhysicalFs {
    fn file_exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.resolve(path))
    }

    fn copy_file(&self, source: &Path, destination: &Path, overwrite: bool) -> io::Result<()> {
        let destination = self.resolve(destination);
        if !overwrite && destination.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", destination.display()),
            ));
        }

        std::fs::copy(self.resolve(source), &destination).map(|_| ())
    }

    fn relative_path(&self, path: &Path) -> String {
        let resolved = self.resolve(path);
        resolved
            .strip_prefix(&self.root)
            .unwrap_or(&resolved)
            .display()
            .to_string()
    }
}
