//! ResolvedModule value object - where an import specifier points

use std::path::{Path, PathBuf};

/// Which stage of resolution produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionOrigin {
    /// The front-end's own resolution algorithm
    Native,
    /// A fallback search directory
    Fallback,
}

/// A successful resolution. Failure is represented by `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedModule {
    path: PathBuf,
    origin: ResolutionOrigin,
}

impl ResolvedModule {
    pub fn native(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: ResolutionOrigin::Native,
        }
    }

    pub fn fallback(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: ResolutionOrigin::Fallback,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> ResolutionOrigin {
        self.origin
    }

    /// True for `.d.ts` declaration files
    pub fn is_declaration(&self) -> bool {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".d.ts"))
    }
}
