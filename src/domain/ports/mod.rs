//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides file systems; the compiler front-end is supplied
//! by the embedding application.

pub mod file_system;
pub mod front_end;

pub use file_system::{FileSystem, FsError, FsResult};
pub use front_end::{CompilerHost, FrontEnd, LanguageService, LanguageServiceHost};
