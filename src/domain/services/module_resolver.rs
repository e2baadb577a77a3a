//! Module Resolver
//!
//! Resolves an import specifier relative to its containing file:
//!
//! 1. The front-end's native algorithm, run against the `FileSystem` port.
//!    A hit here always wins.
//! 2. Each fallback directory in order, probing exactly two declaration paths:
//!    `<dir>/<specifier>/index.d.ts` then `<dir>/<specifier>.d.ts`.
//!
//! Directory contents are never listed during fallback, so a lookup costs at
//! most two `exists` probes per fallback directory. A miss is `None`; the
//! front-end reports it as a diagnostic, the host never fails on it.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{FileSystem, FrontEnd};
use crate::domain::value_objects::{CompilerOptions, FallbackSearchPath, ResolvedModule};

pub struct ModuleResolver {
    front_end: Arc<dyn FrontEnd>,
    fs: Arc<dyn FileSystem>,
    options: Arc<CompilerOptions>,
    fallback: FallbackSearchPath,
}

impl ModuleResolver {
    pub fn new(
        front_end: Arc<dyn FrontEnd>,
        fs: Arc<dyn FileSystem>,
        options: Arc<CompilerOptions>,
        fallback: FallbackSearchPath,
    ) -> Self {
        Self {
            front_end,
            fs,
            options,
            fallback,
        }
    }

    pub fn fallback(&self) -> &FallbackSearchPath {
        &self.fallback
    }

    /// Resolve one specifier
    pub fn resolve(&self, specifier: &str, containing_file: &Path) -> Option<ResolvedModule> {
        if let Some(path) = self.front_end.resolve_module_name(
            specifier,
            containing_file,
            &self.options,
            self.fs.as_ref(),
        ) {
            return Some(ResolvedModule::native(path));
        }

        let resolved = self.resolve_fallback(specifier);
        if resolved.is_none() {
            debug!(
                specifier,
                from = %containing_file.display(),
                "module not resolved"
            );
        }
        resolved
    }

    /// Resolve every specifier, keeping positions: unresolved entries are `None`
    pub fn resolve_all(
        &self,
        specifiers: &[String],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>> {
        specifiers
            .iter()
            .map(|specifier| self.resolve(specifier, containing_file))
            .collect()
    }

    fn resolve_fallback(&self, specifier: &str) -> Option<ResolvedModule> {
        for dir in self.fallback.iter() {
            for candidate in FallbackSearchPath::candidates(dir, specifier) {
                if self.fs.exists(&candidate) {
                    debug!(
                        specifier,
                        path = %candidate.display(),
                        "resolved from fallback search path"
                    );
                    return Some(ResolvedModule::fallback(candidate));
                }
            }
        }
        None
    }
}
