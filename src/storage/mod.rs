//! Key-value persistence backends
//!
//! Each backend stores opaque strings under fixed keys, so stores written by
//! one backend can be copied verbatim into another.

mod file;
mod memory;
mod sqlite;

pub(crate) use file::FileStorage;
pub(crate) use memory::MemoryStorage;
pub(crate) use sqlite::SqliteStorage;

use std::path::Path;

use crate::error::StorageError;

pub(crate) trait Storage {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key`; missing keys are not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Backend selected by config or `--storage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StorageKind {
    /// One file per key in the data directory (default)
    #[default]
    File,
    /// Single SQLite database in the data directory
    Sqlite,
    /// In-memory only, nothing survives the process
    Memory,
}

/// Database file name used by the SQLite backend
const SQLITE_FILE: &str = "repositor.db";

pub(crate) fn open_storage(
    kind: StorageKind,
    data_dir: &Path,
) -> Result<Box<dyn Storage>, StorageError> {
    tracing::debug!(?kind, dir = %data_dir.display(), "opening storage");
    let storage: Box<dyn Storage> = match kind {
        StorageKind::File => Box::new(FileStorage::new(data_dir.to_path_buf())),
        StorageKind::Sqlite => Box::new(SqliteStorage::open(&data_dir.join(SQLITE_FILE))?),
        StorageKind::Memory => Box::new(MemoryStorage::default()),
    };
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_storage_delegates() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::default());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn open_storage_sqlite_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = open_storage(StorageKind::Sqlite, dir.path()).unwrap();
        storage.set("loja22_theme", "dark").unwrap();
        assert!(dir.path().join(SQLITE_FILE).exists());
    }

    #[test]
    fn open_storage_file_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("not-yet");
        let storage = open_storage(StorageKind::File, &nested).unwrap();
        assert_eq!(storage.get("loja22_tasks").unwrap(), None);
        assert!(!nested.exists());
    }
}
