//! Durable locale preference.
//!
//! - `storage`: the host key-value API and its in-memory and file backends
//! - `preference`: validated load/save of the chosen locale

pub mod preference;
pub mod storage;

pub use preference::{DEFAULT_STORAGE_KEY, LocalePreferenceStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
