//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod compiler_options;
mod resolved_module;
mod search_path;
mod version;

pub use compiler_options::{
    CompilerOptions, ModuleKind, NewLine, ScriptTarget, UnknownOptionValue,
};
pub use resolved_module::{ResolutionOrigin, ResolvedModule};
pub use search_path::FallbackSearchPath;
pub use version::FileVersion;
