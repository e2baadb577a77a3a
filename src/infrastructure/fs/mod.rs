//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod local;
mod memory;
mod remote;

pub use local::LocalFs;
pub use memory::MemoryFs;
pub use remote::RemoteFs;
