use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

/// Process-local store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.entries.get(key).map(|val| return val.to_string()));
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        return Ok(());
    }
}
