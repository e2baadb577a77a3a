//! Watch session orchestration
//!
//! A session moves through four phases:
//!
//! 1. **Initializing** - every source file under the project root is tracked
//!    at version 0.
//! 2. **Analyzing** - one language service is created over a `SessionHost`
//!    and reused for the whole session.
//! 3. **Watching** - `tick` checks each file whose poll timer is due. A
//!    strictly newer timestamp bumps that file's version.
//! 4. **Emitting** - output for exactly the changed file is requested,
//!    written and its diagnostics surfaced. Then back to watching.
//!
//! Detection and emission for one file finish before its timer is re-armed,
//! so a second check can never overlap an emission in flight.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info, warn};

use crate::application::host::{HostConfig, SessionHost};
use crate::domain::entities::Diagnostic;
use crate::domain::ports::{FileSystem, FrontEnd, LanguageService};
use crate::domain::value_objects::FileVersion;
use crate::error::{HostError, HostResult};

use super::event::{WatchEvent, WatchOptions, WatcherState};
use super::handle::WatchHandle;
use super::schedule::PollSchedule;
use super::versions::VersionTable;

/// Longest the background loop sleeps before re-checking its stop flag
const MAX_IDLE: Duration = Duration::from_millis(50);

/// Directories never scanned for sources
const SKIPPED_DIRS: [&str; 2] = ["node_modules", ".git"];

type EventSink = Box<dyn Fn(WatchEvent) + Send>;

/// What one emission cycle produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEmit {
    pub written: Vec<PathBuf>,
    pub emit_skipped: bool,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct WatchOrchestrator {
    config: HostConfig,
    fs: Arc<dyn FileSystem>,
    options: WatchOptions,
    versions: Arc<RwLock<VersionTable>>,
    service: Box<dyn LanguageService>,
    schedule: PollSchedule,
    state: WatcherState,
    on_event: EventSink,
    stopped: bool,
}

impl WatchOrchestrator {
    /// Initialize a session, create its language service and run the initial
    /// emission of every tracked file
    pub fn start<F>(
        config: HostConfig,
        fs: Arc<dyn FileSystem>,
        front_end: Arc<dyn FrontEnd>,
        options: WatchOptions,
        on_event: F,
    ) -> HostResult<Self>
    where
        F: Fn(WatchEvent) + Send + 'static,
    {
        let root = config.project_root.clone();
        if !fs.is_dir(&root) {
            return Err(HostError::configuration(format!(
                "project root {} is not a directory",
                root.display()
            )));
        }

        let files = collect_sources(
            fs.as_ref(),
            &root,
            &options.extension,
            config.options.out_dir.as_deref(),
        );
        let mut table = VersionTable::new();
        for file in &files {
            table.track(file.clone(), fs.modified(file).ok());
        }
        let versions = Arc::new(RwLock::new(table));

        let host = SessionHost::new(
            config.clone(),
            Arc::clone(&fs),
            Arc::clone(&front_end),
            Arc::clone(&versions),
        );
        let service = front_end.create_language_service(Arc::new(host));

        info!(root = %root.display(), files = files.len(), "watch session started");

        let mut orchestrator = Self {
            schedule: PollSchedule::new(options.interval),
            config,
            fs,
            options,
            versions,
            service,
            state: WatcherState::new(),
            on_event: Box::new(on_event),
            stopped: false,
        };
        orchestrator.notify(WatchEvent::WatchStarted {
            root: root.display().to_string(),
            files: files.len(),
        });

        for file in &files {
            orchestrator.emit_logged(file);
        }

        let now = Instant::now();
        for file in files {
            orchestrator.schedule.arm(file, now);
        }
        Ok(orchestrator)
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn version(&self, path: &Path) -> Option<FileVersion> {
        self.read_versions().version(path)
    }

    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.read_versions().files()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Queue an early check of `path` for the next tick
    pub fn wake(&mut self, path: PathBuf) {
        self.state.add_change(path);
    }

    /// Run one timer pass. Returns how many files were re-emitted.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.stopped {
            return 0;
        }

        for path in self.state.take_changes() {
            self.schedule.wake(&path, now);
        }

        let mut emitted = 0;
        for path in self.schedule.take_due(now) {
            if self.check(&path) {
                emitted += 1;
            }
            self.schedule.arm(path, now);
        }
        emitted
    }

    /// Emit one file through the language service.
    ///
    /// Diagnostics are surfaced before output is written; a write failure
    /// aborts the remaining artifacts of this file only.
    pub fn emit_file(&mut self, path: &Path) -> HostResult<FileEmit> {
        let output = self.service.emit_output(path);
        let diagnostics = self.service.diagnostics(path);

        for diagnostic in &diagnostics {
            if diagnostic.is_error() {
                warn!("{diagnostic}");
            } else {
                info!("{diagnostic}");
            }
            self.notify(WatchEvent::diagnostic(diagnostic));
        }

        let mut written = Vec::new();
        if output.emit_skipped {
            warn!(file = %path.display(), "emit skipped");
        } else {
            for artifact in &output.artifacts {
                self.fs
                    .write(artifact.path(), artifact.content())
                    .map_err(|source| HostError::Write {
                        path: artifact.path().to_path_buf(),
                        source,
                    })?;
                written.push(artifact.path().to_path_buf());
            }
        }

        debug!(file = %path.display(), artifacts = written.len(), "emitted");
        self.notify(WatchEvent::Emitted {
            path: path.display().to_string(),
            artifacts: written.iter().map(|p| p.display().to_string()).collect(),
            emit_skipped: output.emit_skipped,
        });

        Ok(FileEmit {
            written,
            emit_skipped: output.emit_skipped,
            diagnostics,
        })
    }

    /// Deregister every timer and end the session
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.schedule.clear();
        self.stopped = true;
        info!(root = %self.config.project_root.display(), "watch session stopped");
        self.notify(WatchEvent::Shutdown);
    }

    /// Run the session on a background thread until the handle is stopped
    pub fn spawn(mut self) -> HostResult<WatchHandle> {
        let (watcher, events) = if self.options.native_events {
            let (watcher, events) = self.native_watcher()?;
            (Some(watcher), Some(events))
        } else {
            (None, None)
        };

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let thread = std::thread::Builder::new()
            .name("tshost-watch".to_string())
            .spawn(move || {
                let _watcher = watcher;
                while flag.load(Ordering::SeqCst) {
                    self.tick(Instant::now());
                    let wait = self.idle_wait(Instant::now());
                    match &events {
                        Some(rx) => {
                            if let Ok(path) = rx.recv_timeout(wait) {
                                self.state.add_change(path);
                                while let Ok(path) = rx.try_recv() {
                                    self.state.add_change(path);
                                }
                            }
                        }
                        None => std::thread::sleep(wait),
                    }
                }
                self.shutdown();
            })?;

        Ok(WatchHandle::new(running, thread))
    }

    fn check(&mut self, path: &Path) -> bool {
        let modified = match self.fs.modified(path) {
            Ok(modified) => modified,
            Err(e) => {
                // Vanished files keep their version; retried next interval
                debug!(file = %path.display(), error = %e, "timestamp unavailable");
                return false;
            }
        };

        let observed = self.write_versions().observe(path, modified);
        let Some(version) = observed else {
            return false;
        };

        info!(file = %path.display(), %version, "file changed");
        self.notify(WatchEvent::FileChanged {
            path: path.display().to_string(),
            version: version.get(),
        });
        self.emit_logged(path);
        true
    }

    fn emit_logged(&mut self, path: &Path) {
        if let Err(e) = self.emit_file(path) {
            error!(file = %path.display(), error = %e, "emission failed");
            self.notify(WatchEvent::Error {
                message: format!("{}: {}", path.display(), e),
            });
        }
    }

    fn idle_wait(&self, now: Instant) -> Duration {
        self.schedule
            .next_due()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(MAX_IDLE)
            .min(MAX_IDLE)
    }

    fn native_watcher(&self) -> HostResult<(RecommendedWatcher, Receiver<PathBuf>)> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| HostError::Watch {
            message: e.to_string(),
        })?;

        watcher
            .watch(&self.config.project_root, RecursiveMode::Recursive)
            .map_err(|e| HostError::Watch {
                message: e.to_string(),
            })?;
        Ok((watcher, rx))
    }

    fn notify(&self, event: WatchEvent) {
        (self.on_event)(event);
    }

    fn read_versions(&self) -> RwLockReadGuard<'_, VersionTable> {
        self.versions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_versions(&self) -> RwLockWriteGuard<'_, VersionTable> {
        self.versions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Every file under `root` with the given extension, sorted.
///
/// The output directory (relative to `root` unless absolute) is skipped so
/// emitted declarations never feed back into the session. Symlinked
/// directories are not followed, so each file is tracked under one path.
fn collect_sources(
    fs: &dyn FileSystem,
    root: &Path,
    extension: &str,
    out_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let out_dir = out_dir.map(|dir| root.join(dir));
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs.list_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot list directory");
                continue;
            }
        };
        for entry in entries {
            if fs.is_dir(&entry) {
                let skipped = fs.is_symlink(&entry)
                    || out_dir.as_ref().is_some_and(|out| entry == *out)
                    || entry
                        .file_name()
                        .is_some_and(|name| SKIPPED_DIRS.iter().any(|s| name == *s));
                if !skipped {
                    pending.push(entry);
                }
            } else if entry.extension().is_some_and(|ext| ext == extension) {
                found.push(entry);
            }
        }
    }

    found.sort();
    found
}
