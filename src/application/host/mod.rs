//! Compiler hosts
//!
//! Two independent hosts share one `HostConfig` value:
//!
//! - `ProjectCompilerHost` - the one-shot `CompilerHost`, re-creatable per build
//! - `SessionHost` - the `LanguageServiceHost` of a watch session

mod compiler_host;
mod config;
mod environment;
mod session_host;

pub use compiler_host::ProjectCompilerHost;
pub use config::HostConfig;
pub use environment::HostEnvironment;
pub use session_host::SessionHost;
