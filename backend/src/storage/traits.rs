//! # Storage Traits
//!
//! The storage abstraction that lets the domain layer work against
//! different persistence backends without modification.

use anyhow::Result;

/// A synchronous, per-installation key-value store.
///
/// Each record collection is serialized as a whole and stored under its own
/// key. Implementations must make `set` overwrite unconditionally; there are
/// no partial or delta writes.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw string stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior content.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
