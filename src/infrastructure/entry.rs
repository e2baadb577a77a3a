//! Entry-point discovery
//!
//! Picks the compilation roots for a project: explicit `files` from the
//! project configuration when present, otherwise the first conventional
//! entry filename that exists.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ports::FileSystem;
use crate::error::{HostError, HostResult};

/// Conventional entry files, probed in order
pub const CONVENTIONAL_ENTRIES: [&str; 4] = ["src/index.ts", "index.ts", "src/main.ts", "main.ts"];

/// Determine the entry files for a project
pub fn discover_entries(
    fs: &dyn FileSystem,
    project_root: &Path,
    configured: &[PathBuf],
) -> HostResult<Vec<PathBuf>> {
    let existing: Vec<PathBuf> = configured.iter().filter(|p| fs.exists(p)).cloned().collect();
    if !existing.is_empty() {
        return Ok(existing);
    }

    for candidate in CONVENTIONAL_ENTRIES {
        let path = project_root.join(candidate);
        if fs.exists(&path) && !fs.is_dir(&path) {
            debug!(entry = %path.display(), "using conventional entry file");
            return Ok(vec![path]);
        }
    }

    Err(HostError::configuration(format!(
        "no usable entry file in {} (tried {})",
        project_root.display(),
        CONVENTIONAL_ENTRIES.join(", ")
    )))
}
