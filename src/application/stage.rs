//! Copy-mode staging
//!
//! Projects that are not compiled are staged as-is: every file under the
//! source tree is copied to `<root>/<dest>` keeping its relative layout.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::domain::ports::FileSystem;

/// Files written by one staging run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageResult {
    pub destination: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Copy `source` (a file or a directory tree) into `<root>/<dest>`.
///
/// Symlinked directories inside the tree are skipped.
pub fn stage(
    fs: &dyn FileSystem,
    source: &Path,
    root: &Path,
    dest: &Path,
) -> Result<StageResult> {
    let destination = root.join(dest);
    if !fs.exists(source) {
        bail!("staging source {} does not exist", source.display());
    }

    let mut result = StageResult {
        destination: destination.clone(),
        written: Vec::new(),
    };

    if !fs.is_dir(source) {
        let name = source
            .file_name()
            .with_context(|| format!("staging source {} has no file name", source.display()))?;
        copy_file(fs, source, &destination.join(name))?;
        result.written.push(destination.join(name));
        return Ok(result);
    }

    let mut pending = vec![source.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs
            .list_dir(&dir)
            .with_context(|| format!("failed to list {}", dir.display()))?;
        for entry in entries {
            if fs.is_dir(&entry) {
                if fs.is_symlink(&entry) {
                    debug!(dir = %entry.display(), "not following symlinked directory");
                } else {
                    pending.push(entry);
                }
                continue;
            }
            let relative = entry
                .strip_prefix(source)
                .with_context(|| format!("{} escapes {}", entry.display(), source.display()))?;
            let target = destination.join(relative);
            copy_file(fs, &entry, &target)?;
            result.written.push(target);
        }
    }

    result.written.sort();
    info!(
        source = %source.display(),
        destination = %destination.display(),
        files = result.written.len(),
        "staged files"
    );
    Ok(result)
}

fn copy_file(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<()> {
    let content = fs
        .read(from)
        .with_context(|| format!("failed to read {}", from.display()))?;
    fs.write(to, &content)
        .with_context(|| format!("failed to write {}", to.display()))
}
