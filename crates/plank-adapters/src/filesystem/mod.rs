//! Filesystem adapters: production (`std::fs`) and in-memory (testing).

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
