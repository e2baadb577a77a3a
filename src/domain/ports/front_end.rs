//! Compiler front-end port
//!
//! The front-end (parser, checker, emitter) is an opaque service. The host
//! feeds it a file system view and a set of root files, and gets back
//! diagnostics and emitted artifacts. These traits are the seam in both
//! directions:
//!
//! - `FrontEnd` - what the compiler offers
//! - `CompilerHost` - what the compiler needs for a one-shot program
//! - `LanguageServiceHost` - what a long-lived analysis service needs
//! - `LanguageService` - the incremental service handle itself

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{Diagnostic, EmitOutput, ProgramOutput, Snapshot, SourceUnit};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{CompilerOptions, FileVersion, ResolvedModule, ScriptTarget};
use crate::error::HostResult;

/// The opaque compiler service
pub trait FrontEnd: Send + Sync {
    /// Location of the standard library declarations shipped with this compiler
    fn default_lib_location(&self) -> PathBuf;

    /// Parse text into a unit at the requested language level
    fn parse(&self, file_name: &Path, text: &str, target: ScriptTarget) -> SourceUnit;

    /// The compiler's own module resolution, using `fs` as its substrate
    fn resolve_module_name(
        &self,
        specifier: &str,
        containing_file: &Path,
        options: &CompilerOptions,
        fs: &dyn FileSystem,
    ) -> Option<PathBuf>;

    /// Check and emit a whole program rooted at `root_files`.
    ///
    /// Output is written through `host.write_output`; a write failure aborts
    /// the emit and is returned as the error.
    fn emit_program(
        &self,
        root_files: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost,
    ) -> HostResult<ProgramOutput>;

    /// Create a long-lived analysis service that re-analyzes a file only when
    /// its version reported by `host` changes
    fn create_language_service(
        &self,
        host: Arc<dyn LanguageServiceHost>,
    ) -> Box<dyn LanguageService>;
}

/// Everything a front-end needs from its environment for a one-shot program
pub trait CompilerHost {
    fn default_lib_location(&self) -> PathBuf;

    fn current_directory(&self) -> &Path;

    /// File name as used for identity comparisons (lower-cased when the
    /// environment is case-insensitive)
    fn canonical_file_name(&self, file_name: &Path) -> PathBuf;

    fn new_line(&self) -> &'static str;

    fn use_case_sensitive_file_names(&self) -> bool;

    fn file_exists(&self, file_name: &Path) -> bool;

    fn read_file(&self, file_name: &Path) -> Option<String>;

    /// Subdirectories of `path`
    fn directories(&self, path: &Path) -> Vec<PathBuf>;

    /// Read and parse a source file; `None` when it does not exist
    fn read_source(&self, file_name: &Path, target: ScriptTarget) -> Option<SourceUnit>;

    /// Read and parse a file named relative to the project root
    fn read_source_relative(
        &self,
        relative_name: &Path,
        target: ScriptTarget,
    ) -> HostResult<SourceUnit>;

    fn write_output(&self, file_name: &Path, content: &str) -> HostResult<()>;

    /// Resolve each specifier. The output has the same length as the input;
    /// unresolved specifiers are `None` at their position.
    fn resolve_imports(
        &self,
        specifiers: &[String],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>>;
}

/// Snapshot provider for a long-lived analysis service
pub trait LanguageServiceHost: Send + Sync {
    fn compilation_options(&self) -> CompilerOptions;

    /// Files the service should consider part of the program
    fn script_file_names(&self) -> Vec<PathBuf>;

    /// Change-detection key of a file
    fn script_version(&self, file_name: &Path) -> Option<FileVersion>;

    /// Current text of a file
    fn script_snapshot(&self, file_name: &Path) -> Option<Snapshot>;

    fn current_directory(&self) -> PathBuf;

    fn default_lib_location(&self) -> PathBuf;

    fn file_exists(&self, file_name: &Path) -> bool;

    fn read_file(&self, file_name: &Path) -> Option<String>;

    fn resolve_imports(
        &self,
        specifiers: &[String],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>>;
}

/// Incremental analysis service owned by one watch session
pub trait LanguageService: Send {
    /// Emitted output for exactly one file
    fn emit_output(&mut self, file_name: &Path) -> EmitOutput;

    /// Syntactic and semantic diagnostics for one file
    fn diagnostics(&mut self, file_name: &Path) -> Vec<Diagnostic>;
}
