//! Default [`ConfigRepository`](applock_core::ConfigRepository)
//! implementations.
//!
//! The repository seam models no failure path: a persistence fault must
//! never take the lock gate down. Both implementations here honor that:
//! the file store degrades to defaults on unreadable data and logs
//! write failures instead of surfacing them.

mod file;
mod memory;

pub use file::JsonFileConfigRepository;
pub use memory::MemoryConfigRepository;
