// File: src/storage.rs
// Purpose: Key-value persistence surface with JSON helpers

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Trait for raw string key-value backends
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a raw value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a raw value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a key
    async fn remove(&self, key: &str) -> Result<()>;

    /// Get storage backend name
    fn name(&self) -> &'static str;
}

/// Reads a key and deserializes its JSON value
///
/// A missing key is `Ok(None)`; a present but unparseable value is an
/// error with the key in its context.
pub async fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse stored JSON under key '{}'", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serializes a value to JSON and stores it under the key
pub async fn set_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
    store.set(key, raw).await
}

/// In-memory key-value backend
///
/// Fast but non-persistent, the same role browser local storage plays for
/// a single tab. Cloning shares the underlying map.
#[derive(Clone)]
pub struct MemoryKv {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKv {
    /// Create a new memory backend
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u32,
        label: String,
    }

    #[tokio::test]
    async fn test_memory_kv_basic() {
        let store = MemoryKv::new();

        store.set("key", "value".to_string()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));

        store.remove("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let store = MemoryKv::new();
        let sample = Sample {
            id: 7,
            label: "seven".to_string(),
        };

        set_json(&store, "sample", &sample).await.unwrap();
        let loaded: Option<Sample> = get_json(&store, "sample").await.unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[tokio::test]
    async fn test_get_json_missing_key_is_none() {
        let store = MemoryKv::new();
        let loaded: Option<Sample> = get_json(&store, "absent").await.unwrap();
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_get_json_bad_payload_is_error() {
        let store = MemoryKv::new();
        store.set("bad", "not json".to_string()).await.unwrap();

        let result: Result<Option<Sample>> = get_json(&store, "bad").await;
        assert!(result.is_err());
    }
}
