//! In-memory File System Implementation
//!
//! Files live in a `BTreeMap`; directories exist implicitly wherever a file
//! sits below them. Modification times come from a logical clock that ticks
//! once per write, so timestamp-based change detection is deterministic.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Clone)]
struct MemoryFile {
    content: String,
    modified: SystemTime,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, MemoryFile>,
    clock: u64,
}

impl MemoryState {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.clock)
    }
}

/// In-memory file system. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    state: Arc<RwLock<MemoryState>>,
    case_sensitive: bool,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
            case_sensitive: true,
        }
    }

    /// Create a file system pre-populated with files
    pub fn with_files<I, P, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: Into<String>,
    {
        let fs = Self::new();
        for (path, content) in files {
            fs.insert(path, content);
        }
        fs
    }

    /// Treat names differing only by case as the same file
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Add or replace a file, advancing its modification time
    pub fn insert(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let key = self.key(path.as_ref());
        let mut state = self.write_state();
        let modified = state.tick();
        state.files.insert(
            key,
            MemoryFile {
                content: content.into(),
                modified,
            },
        );
    }

    /// Advance a file's modification time without changing its content
    pub fn touch(&self, path: impl AsRef<Path>) -> FsResult<()> {
        let key = self.key(path.as_ref());
        let mut state = self.write_state();
        let modified = state.tick();
        match state.files.get_mut(&key) {
            Some(file) => {
                file.modified = modified;
                Ok(())
            }
            None => Err(FsError::NotFound(path.as_ref().to_path_buf())),
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> FsResult<()> {
        let key = self.key(path.as_ref());
        self.write_state()
            .files
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.as_ref().to_path_buf()))
    }

    /// All file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.read_state().files.keys().cloned().collect()
    }

    fn key(&self, path: &Path) -> PathBuf {
        // Drop `.` components and trailing separators
        let normalized: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if self.case_sensitive {
            normalized
        } else {
            PathBuf::from(normalized.to_string_lossy().to_lowercase())
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let key = self.key(path);
        let is_file = self.read_state().files.contains_key(&key);
        is_file || self.is_dir(path)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        let key = self.key(path);
        self.read_state()
            .files
            .get(&key)
            .map(|f| f.content.clone())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        if self.is_dir(path) {
            return Err(FsError::Other(format!(
                "cannot write {}: is a directory",
                path.display()
            )));
        }
        self.insert(path, content);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let dir = self.key(path);
        let state = self.read_state();
        let mut entries: Vec<PathBuf> = state
            .files
            .keys()
            .filter_map(|file| {
                let rest = file.strip_prefix(&dir).ok()?;
                let first = rest.components().next()?;
                Some(dir.join(first))
            })
            .collect();
        entries.dedup();
        // Directories only exist while they hold files
        if entries.is_empty() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dir = self.key(path);
        self.read_state()
            .files
            .keys()
            .any(|file| file != &dir && file.starts_with(&dir))
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        let key = self.key(path);
        self.read_state()
            .files
            .get(&key)
            .map(|f| f.modified)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}
