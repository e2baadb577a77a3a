//! tshost - compiler host and incremental watch sessions
//!
//! Drives an opaque TypeScript-style compiler front-end against an abstract
//! file system. One-shot builds go through `ProjectCompilerHost`; watch
//! sessions keep emitted output in sync with source edits by re-emitting only
//! the files whose version changed.
//!
//! ```ignore
//! use std::path::Path;
//! use std::sync::Arc;
//! use tshost::{build, BuildRequest, LocalFs};
//!
//! let fs = Arc::new(LocalFs::new());
//! let request = BuildRequest::from_project(fs.as_ref(), Path::new("."))?;
//! let result = build(&request, fs, front_end)?;
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;


// Re-exports for convenience
pub use application::{
    build, run, stage, BuildMode, BuildOutcome, BuildRequest, HostConfig, ProjectCompilerHost,
    WatchEvent, WatchHandle, WatchOptions, WatchOrchestrator,
};
pub use domain::entities::{BuildResult, Diagnostic, EmitOutput, OutputArtifact, Severity};
pub use domain::ports::{
    CompilerHost, FileSystem, FrontEnd, FsError, LanguageService, LanguageServiceHost,
};
pub use domain::services::ModuleResolver;
pub use domain::value_objects::{CompilerOptions, FallbackSearchPath, FileVersion, ResolvedModule};
pub use error::{HostError, HostResult};
pub use infrastructure::{load_tsconfig, LocalFs, MemoryFs, RemoteFs};
