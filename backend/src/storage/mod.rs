//! Storage layer: a small key-value contract plus the two backends that
//! implement it (JSON files on disk, and an in-memory map).

pub mod json;
pub mod memory;
pub mod traits;

pub use json::JsonConnection;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
