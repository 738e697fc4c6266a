#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::KeyValueStore;

/// Stores every key in a single YAML map so values survive restarts.
pub struct FileStore {
    pub file_path: path::PathBuf,
}

impl FileStore {
    pub fn new(file_path: path::PathBuf) -> FileStore {
        return FileStore { file_path };
    }

    async fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        return Ok(serde_yaml::from_str(&payload)?);
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let payload = serde_yaml::to_string(entries)?;
        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read().await?;
        return Ok(entries.get(key).cloned());
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read().await?;
        entries.insert(key.to_string(), value.to_string());
        return self.write(&entries).await;
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        return self.write(&entries).await;
    }
}
