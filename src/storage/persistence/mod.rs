//! Persistence port implementations.

mod filesystem;
mod memory;

pub use filesystem::FilesystemPort;
pub use memory::MemoryPort;
