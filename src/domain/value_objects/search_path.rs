//! FallbackSearchPath value object - ordered directories for declaration lookup

use std::path::{Path, PathBuf};

/// Directories consulted for module declarations after native resolution fails.
///
/// Order is significant: the first directory with a matching declaration wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackSearchPath {
    dirs: Vec<PathBuf>,
}

impl FallbackSearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Directories in search order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// The two declaration paths probed for `specifier` under `dir`, in order:
    /// `<dir>/<specifier>/index.d.ts`, then `<dir>/<specifier>.d.ts`.
    pub fn candidates(dir: &Path, specifier: &str) -> [PathBuf; 2] {
        [
            dir.join(specifier).join("index.d.ts"),
            dir.join(format!("{specifier}.d.ts")),
        ]
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FallbackSearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}
