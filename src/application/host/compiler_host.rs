//! One-shot compiler host
//!
//! Presents the `CompilerHost` contract to a front-end. Every file operation
//! goes to the `FileSystem` port and every import lookup to the
//! `ModuleResolver`. Nothing is cached: each call reads the adapter's current
//! state, so a fresh host per build is always consistent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::SourceUnit;
use crate::domain::ports::{CompilerHost, FileSystem, FrontEnd};
use crate::domain::services::ModuleResolver;
use crate::domain::value_objects::{ResolvedModule, ScriptTarget};
use crate::error::{HostError, HostResult};

use super::{HostConfig, HostEnvironment};

pub struct ProjectCompilerHost {
    config: HostConfig,
    env: HostEnvironment,
    fs: Arc<dyn FileSystem>,
    front_end: Arc<dyn FrontEnd>,
    resolver: ModuleResolver,
}

impl ProjectCompilerHost {
    pub fn new(config: HostConfig, fs: Arc<dyn FileSystem>, front_end: Arc<dyn FrontEnd>) -> Self {
        let env = HostEnvironment::detect(fs.as_ref(), &config.options);
        Self::with_environment(config, env, fs, front_end)
    }

    pub fn with_environment(
        config: HostConfig,
        env: HostEnvironment,
        fs: Arc<dyn FileSystem>,
        front_end: Arc<dyn FrontEnd>,
    ) -> Self {
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
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    fn parse(&self, file_name: &Path, target: ScriptTarget) -> HostResult<Option<SourceUnit>> {
        if !self.fs.exists(file_name) {
            return Ok(None);
        }
        match self.fs.read(file_name) {
            Ok(text) => Ok(Some(self.front_end.parse(file_name, &text, target))),
            // Removed between the probe and the read
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl CompilerHost for ProjectCompilerHost {
    fn default_lib_location(&self) -> PathBuf {
        self.front_end.default_lib_location()
    }

    fn current_directory(&self) -> &Path {
        self.env.current_dir()
    }

    fn canonical_file_name(&self, file_name: &Path) -> PathBuf {
        self.env.canonical_file_name(file_name)
    }

    fn new_line(&self) -> &'static str {
        self.env.new_line().as_str()
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        self.env.case_sensitive()
    }

    fn file_exists(&self, file_name: &Path) -> bool {
        self.fs.exists(file_name)
    }

    fn read_file(&self, file_name: &Path) -> Option<String> {
        self.fs.read(file_name).ok()
    }

    fn directories(&self, path: &Path) -> Vec<PathBuf> {
        match self.fs.list_dir(path) {
            Ok(entries) => entries.into_iter().filter(|p| self.fs.is_dir(p)).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn read_source(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceUnit> {
        match self.parse(file_name, target) {
            Ok(unit) => unit,
            Err(e) => {
                warn!(file = %file_name.display(), error = %e, "failed to read source");
                None
            }
        }
    }

    fn read_source_relative(
        &self,
        relative_name: &Path,
        target: ScriptTarget,
    ) -> HostResult<SourceUnit> {
        let path = self.config.project_root.join(relative_name);
        self.parse(&path, target)?
            .ok_or(HostError::NotFound { path })
    }

    fn write_output(&self, file_name: &Path, content: &str) -> HostResult<()> {
        self.fs
            .write(file_name, content)
            .map_err(|source| HostError::Write {
                path: file_name.to_path_buf(),
                source,
            })?;
        debug!(path = %file_name.display(), bytes = content.len(), "wrote output");
        Ok(())
    }

    fn resolve_imports(
        &self,
        specifiers: &[String],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>> {
        self.resolver.resolve_all(specifiers, containing_file)
    }
}
