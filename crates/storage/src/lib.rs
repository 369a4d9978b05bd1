#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;
pub mod tab_store;

pub use repository::{InMemoryKeyValueStore, KeyValueStore, Storage, StorageError};
pub use tab_store::TabStore;
