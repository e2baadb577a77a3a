//! Process environment as seen by a compiler host
//!
//! Working directory, line terminator and case policy do not depend on
//! project state. They are captured once when a host is built.

use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{CompilerOptions, NewLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    current_dir: PathBuf,
    new_line: NewLine,
    case_sensitive: bool,
}

impl HostEnvironment {
    pub fn new(current_dir: impl Into<PathBuf>, new_line: NewLine, case_sensitive: bool) -> Self {
        Self {
            current_dir: current_dir.into(),
            new_line,
            case_sensitive,
        }
    }

    /// Capture the running process' environment.
    ///
    /// An explicit `newLine` option overrides the platform terminator; case
    /// sensitivity follows the storage the host reads from.
    pub fn detect(fs: &dyn FileSystem, options: &CompilerOptions) -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(
            current_dir,
            options.new_line.unwrap_or_else(NewLine::platform),
            fs.case_sensitive(),
        )
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn new_line(&self) -> NewLine {
        self.new_line
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Identity form of a file name: lower-cased when names are case-insensitive
    pub fn canonical_file_name(&self, file_name: &Path) -> PathBuf {
        if self.case_sensitive {
            file_name.to_path_buf()
        } else {
            PathBuf::from(file_name.to_string_lossy().to_lowercase())
        }
    }
}
