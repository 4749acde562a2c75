//! Key-value store adapters.
//!
//! - `FileStore`: one JSON document on disk, atomic writes under a lock
//! - `MemoryStore`: process-local map
//! - `UnavailableStore`: no storage context; empty reads, dropped writes
//! - `json`: typed, parse-failure-tolerant helpers used by the repositories

mod atomic_json;
mod file_store;
mod json;
mod memory_store;
mod unavailable_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile, FileLock};
pub use file_store::FileStore;
pub use json::{modify_json_list, read_json, write_json};
pub use memory_store::MemoryStore;
pub use unavailable_store::UnavailableStore;
