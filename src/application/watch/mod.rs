//! Watch Session
//!
//! Keeps emitted output in sync with source edits. Each session owns its
//! own version table and language service; nothing is shared between two
//! sessions over the same project.
//!
//! ## Structure
//!
//! - `orchestrator` - session phases, cooperative `tick`, background `spawn`
//! - `versions` - per-file version counters
//! - `schedule` - per-file poll timers
//! - `event` - NDJSON events and options
//! - `handle` - stop/drop controller of a spawned session

mod event;
mod handle;
mod orchestrator;
mod schedule;
mod versions;

pub use event::{WatchEvent, WatchOptions, WatcherState, POLL_INTERVAL_MS};
pub use handle::WatchHandle;
pub use orchestrator::{FileEmit, WatchOrchestrator};
pub use schedule::PollSchedule;
pub use versions::VersionTable;
