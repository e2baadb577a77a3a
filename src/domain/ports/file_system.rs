//! FileSystem port - the storage capability the compiler host runs against
//!
//! Every file the host reads, every artifact it writes and every timestamp the
//! watch session polls goes through this trait, so the same host works over
//! local disk, memory, or a remote machine.
//!
//! Paths are passed through as given. Implementations do no canonicalization.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Map an I/O error, keeping the path the operation was about
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::from_io(err, Path::new(""))
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - local disk, atomic writes via temp file + rename
/// - `MemoryFs` - in-memory with a logical modification clock
/// - `RemoteFs` - SSH-based remote operations
pub trait FileSystem: Send + Sync {
    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to a file, creating missing parent directories first.
    ///
    /// A concurrent reader never observes a partially written file.
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// List the entries of a directory, sorted by path
    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>>;

    /// Check if the path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Last modification time of a file
    fn modified(&self, path: &Path) -> FsResult<SystemTime>;

    /// Whether file names differ by case on this storage
    fn case_sensitive(&self) -> bool {
        !cfg!(any(windows, target_os = "macos"))
    }

    /// Whether the path itself is a symbolic link. Tree walks do not descend
    /// into linked directories.
    fn is_symlink(&self, _path: &Path) -> bool {
        false
    }
}

impl<T: FileSystem + ?Sized> FileSystem for std::sync::Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        (**self).modified(path)
    }

    fn case_sensitive(&self) -> bool {
        (**self).case_sensitive()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        (**self).is_symlink(path)
    }
}
