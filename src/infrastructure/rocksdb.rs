use crate::domain::ports::KvStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{DB, Options};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A persistent store implementation using RocksDB.
///
/// One flat key space, matching the store contract. This struct is
/// thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbKvStore {
    db: Arc<DB>,
}

impl RocksDbKvStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path).map_err(|e| LedgerError::Store(io::Error::other(e)))?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl KvStore for RocksDbKvStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match self.db.get(key.as_bytes()).map_err(io::Error::other)? {
            Some(bytes) => {
                let value = String::from_utf8(bytes)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.db
            .put(key.as_bytes(), value.as_bytes())
            .map_err(io::Error::other)
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        self.db.delete(key.as_bytes()).map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksDbKvStore::open(dir.path()).unwrap();

        store.set("cart", "[]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));

        store.remove("cart").await.unwrap();
        assert!(store.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger_db");

        {
            let store = RocksDbKvStore::open(&path).unwrap();
            store.set("orders", "[]").await.unwrap();
        }

        let store = RocksDbKvStore::open(&path).unwrap();
        assert_eq!(store.get("orders").await.unwrap().as_deref(), Some("[]"));
    }
}
