//! Build entry points
//!
//! `build` runs one full compilation through a fresh `ProjectCompilerHost`.
//! `run` dispatches between that and a background watch session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::host::{HostConfig, ProjectCompilerHost};
use crate::application::watch::{WatchEvent, WatchHandle, WatchOptions, WatchOrchestrator};
use crate::domain::entities::BuildResult;
use crate::domain::ports::{FileSystem, FrontEnd};
use crate::domain::value_objects::{CompilerOptions, FallbackSearchPath};
use crate::error::{HostError, HostResult};
use crate::infrastructure::{discover_entries, load_tsconfig};

/// Everything one build needs besides the file system and the compiler
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub options: CompilerOptions,
    pub project_root: PathBuf,
    /// Compilation roots, absolute
    pub entry_files: Vec<PathBuf>,
    pub fallback: FallbackSearchPath,
}

impl BuildRequest {
    pub fn new(
        options: CompilerOptions,
        project_root: impl Into<PathBuf>,
        entry_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            options,
            project_root: project_root.into(),
            entry_files,
            fallback: FallbackSearchPath::empty(),
        }
    }

    /// Load `tsconfig.json` and discover entry files for `project_root`
    pub fn from_project(fs: &dyn FileSystem, project_root: &Path) -> HostResult<Self> {
        let loaded = load_tsconfig(fs, project_root)?;
        let entry_files = discover_entries(fs, project_root, &loaded.files)?;
        Ok(Self::new(loaded.options, project_root, entry_files))
    }

    pub fn with_fallback(mut self, fallback: FallbackSearchPath) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn host_config(&self) -> HostConfig {
        HostConfig::new(self.options.clone(), self.project_root.clone())
            .with_fallback(self.fallback.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BuildMode {
    #[default]
    Once,
    Watch(WatchOptions),
}

#[derive(Debug)]
pub enum BuildOutcome {
    Completed(BuildResult),
    Watching(WatchHandle),
}

/// Compile the whole program once.
///
/// Diagnostics never fail the build; only a missing entry list, a failed
/// output write or an adapter error does.
pub fn build(
    request: &BuildRequest,
    fs: Arc<dyn FileSystem>,
    front_end: Arc<dyn FrontEnd>,
) -> HostResult<BuildResult> {
    ensure_entries(request)?;

    let host = ProjectCompilerHost::new(request.host_config(), fs, Arc::clone(&front_end));
    let output = front_end.emit_program(&request.entry_files, &request.options, &host)?;
    let result = BuildResult::from(output);

    for diagnostic in &result.diagnostics {
        if diagnostic.is_error() {
            warn!("{diagnostic}");
        } else {
            info!("{diagnostic}");
        }
    }
    info!(
        root = %request.project_root.display(),
        emitted = result.emitted.len(),
        errors = result.error_count(),
        emit_skipped = result.emit_skipped,
        "build finished"
    );
    Ok(result)
}

/// Build once, or start a watch session on a background thread.
///
/// Watch events are logged as NDJSON at debug level; use
/// `WatchOrchestrator::start` directly to receive them.
pub fn run(
    request: &BuildRequest,
    mode: BuildMode,
    fs: Arc<dyn FileSystem>,
    front_end: Arc<dyn FrontEnd>,
) -> HostResult<BuildOutcome> {
    match mode {
        BuildMode::Once => build(request, fs, front_end).map(BuildOutcome::Completed),
        BuildMode::Watch(options) => {
            ensure_entries(request)?;
            let log_event = |event: WatchEvent| {
                debug!(target: "tshost::watch", "{}", event.to_json());
            };
            let session = WatchOrchestrator::start(
                request.host_config(),
                fs,
                front_end,
                options,
                log_event,
            )?;
            session.spawn().map(BuildOutcome::Watching)
        }
    }
}

fn ensure_entries(request: &BuildRequest) -> HostResult<()> {
    if request.entry_files.is_empty() {
        return Err(HostError::configuration(format!(
            "no usable entry file for {}",
            request.project_root.display()
        )));
    }
    Ok(())
}
