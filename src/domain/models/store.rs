use anyhow::Result;
use async_trait::async_trait;

pub type StoreBox = Box<dyn KeyValueStore + Send + Sync>;

/// Persistence capability for small string values that must outlive the
/// process, such as the session id.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
