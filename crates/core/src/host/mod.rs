//! Host adapters implementing the directory capability.

/// `std::fs` backed handles.
pub mod fs;
/// Decoded in-memory snapshots.
pub mod memory;

pub use fs::{FsDirectory, FsFile, FsPicker};
pub use memory::{MemoryDirectory, MemoryFile, MemoryNode};
