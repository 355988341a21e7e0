//! # Storage Layer
//!
//! Persistence for veridoc is a string-keyed key-value store holding
//! JSON-serialized collections, abstracted behind the [`KeyValueStore`]
//! trait:
//!
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** without changing the record logic
//! - Keep the record store **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one `<key>.json` file per key
//!   under the data directory. Writes go through a tmp file + rename so a
//!   single key is never left half-written.
//! - [`memory::InMemoryStore`]: in-memory storage for tests.
//!
//! ## Persisted keys
//!
//! ```text
//! documents            # array of DocumentRecord, insertion-ordered
//! verificationHistory  # array of HistoryEntry
//! user                 # session profile
//! access_token         # bearer token string
//! ```
//!
//! The record-level contract (seeding, append, lookup, history
//! generation) lives in [`records::RecordStore`], which is generic over
//! the backend.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod records;

pub const KEY_DOCUMENTS: &str = "documents";
pub const KEY_HISTORY: &str = "verificationHistory";
pub const KEY_USER: &str = "user";
pub const KEY_ACCESS_TOKEN: &str = "access_token";

/// Abstract interface for raw key-value I/O.
///
/// Absence of a key is a normal outcome (`Ok(None)`), never an error;
/// errors are reserved for actual I/O failures.
pub trait KeyValueStore {
    /// Read the raw value for a key, `None` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the full value for a key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
