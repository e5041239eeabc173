//! Persistent key-value storage

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
