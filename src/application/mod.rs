//! Application Layer
//!
//! Use cases that drive the compiler front-end through the domain ports.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT implement compilation itself (the front-end does)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `build` / `run` - One-shot build, or dispatch to a watch session
//! - `WatchOrchestrator` - Incremental per-file re-emission
//! - `stage` - Copy-mode staging for projects that are not compiled
//!
//! ## Hosts
//!
//! - `ProjectCompilerHost` - `CompilerHost` for one-shot builds
//! - `SessionHost` - `LanguageServiceHost` for watch sessions

pub mod build;
pub mod host;
pub mod stage;
pub mod watch;

pub use build::{build, run, BuildMode, BuildOutcome, BuildRequest};
pub use host::{HostConfig, HostEnvironment, ProjectCompilerHost, SessionHost};
pub use stage::{stage, StageResult};
pub use watch::{
    FileEmit, PollSchedule, VersionTable, WatchEvent, WatchHandle, WatchOptions, WatchOrchestrator,
    WatcherState,
};
