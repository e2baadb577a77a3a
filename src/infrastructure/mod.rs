//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and project discovery.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory, Remote)
//! - `config/` - `tsconfig.json` loading
//! - `entry` - Entry-point discovery

pub mod config;
pub mod entry;
pub mod fs;

pub use config::{load_tsconfig, ConfigWarning, LoadedConfig};
pub use entry::discover_entries;
pub use fs::{LocalFs, MemoryFs, RemoteFs};
