//! Shared host configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::value_objects::{CompilerOptions, FallbackSearchPath};

/// The three values every host variant is constructed with.
///
/// Both `ProjectCompilerHost` and `SessionHost` hold one of these by value;
/// cloning is cheap because the options record is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub options: Arc<CompilerOptions>,
    pub project_root: PathBuf,
    pub fallback: FallbackSearchPath,
}

impl HostConfig {
    pub fn new(options: CompilerOptions, project_root: impl Into<PathBuf>) -> Self {
        Self {
            options: Arc::new(options),
            project_root: project_root.into(),
            fallback: FallbackSearchPath::empty(),
        }
    }

    /// Builder: set the fallback search directories
    pub fn with_fallback(mut self, fallback: FallbackSearchPath) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }
}
