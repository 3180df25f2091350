use crate::domain::ports::KvStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store.
///
/// `Clone` shares the underlying map, so a cloned handle observes the same
/// data — handy for inspecting what a ledger persisted in tests.
#[derive(Default, Clone)]
pub struct InMemoryKvStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove_round_trip() {
        let store = InMemoryKvStore::new();

        assert!(store.get("cart").await.unwrap().is_none());

        store.set("cart", "[]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));

        store.set("cart", "[1]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[1]"));

        store.remove("cart").await.unwrap();
        assert!(store.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = InMemoryKvStore::new();
        let handle = store.clone();

        store.set("orders", "[]").await.unwrap();
        assert_eq!(handle.get("orders").await.unwrap().as_deref(), Some("[]"));
    }
}
