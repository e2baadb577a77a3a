//! Language-service host for a watch session
//!
//! Reads file versions from the session's `VersionTable` and file text from
//! the adapter. The table is the only cache key: a snapshot is always the
//! adapter's current text, and the service decides whether to re-analyze by
//! comparing versions.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::application::watch::VersionTable;
use crate::domain::entities::Snapshot;
use crate::domain::ports::{FileSystem, FrontEnd, LanguageServiceHost};
use crate::domain::services::ModuleResolver;
use crate::domain::value_objects::{CompilerOptions, FileVersion, ResolvedModule};

use super::{HostConfig, HostEnvironment};

pub struct SessionHost {
    config: HostConfig,
    env: HostEnvironment,
    fs: Arc<dyn FileSystem>,
    front_end: Arc<dyn FrontEnd>,
    resolver: ModuleResolver,
    versions: Arc<RwLock<VersionTable>>,
}

impl SessionHost {
    pub fn new(
        config: HostConfig,
        fs: Arc<dyn FileSystem>,
        front_end: Arc<dyn FrontEnd>,
        versions: Arc<RwLock<VersionTable>>,
    ) -> Self {
        let env = HostEnvironment::detect(fs.as_ref(), &config.options);
        let resolver = ModuleResolver::new(
            Arc::clone(&front_end),
            Arc::clone(&fs),
            Arc::clone(&config.options),
            config.fallback.clone(),
        );
        Self {
            config,
            env,
            fs,
            front_end,
            resolver,
            versions,
        }
    }

    fn versions(&self) -> RwLockReadGuard<'_, VersionTable> {
        self.versions.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LanguageServiceHost for SessionHost {
    fn compilation_options(&self) -> CompilerOptions {
        CompilerOptions::clone(&self.config.options)
    }

    fn script_file_names(&self) -> Vec<PathBuf> {
        self.versions().files()
    }

    fn script_version(&self, file_name: &Path) -> Option<FileVersion> {
        self.versions().version(file_name)
    }

    fn script_snapshot(&self, file_name: &Path) -> Option<Snapshot> {
        self.fs.read(file_name).ok().map(Snapshot::from)
    }

    fn current_directory(&self) -> PathBuf {
        self.env.current_dir().to_path_buf()
    }

    fn default_lib_location(&self) -> PathBuf {
        self.front_end.default_lib_location()
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.fs.exists(file_name)
    }

    fn read_file(&self, file_name: &Path) -> Option<String> {
        self.fs.read(file_name).ok()
    }

    fn resolve_imports(
        &self,
        specifiers: &[String],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>> {
        self.resolver.resolve_all(specifiers, containing_file)
    }
}
