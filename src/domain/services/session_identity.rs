#[cfg(test)]
#[path = "session_identity_test.rs"]
mod tests;

use anyhow::Result;
use uuid::Uuid;

use crate::domain::models::StoreBox;

/// Key the session id is persisted under.
pub const SESSION_ID_KEY: &str = "sessionId";

pub struct SessionIdentity {
    store: StoreBox,
}

impl SessionIdentity {
    pub fn new(store: StoreBox) -> SessionIdentity {
        return SessionIdentity { store };
    }

    pub fn create_id() -> String {
        return Uuid::new_v4().to_string();
    }

    /// Returns the persisted id, generating and storing one the first time.
    pub async fn get_or_create(&self) -> Result<String> {
        if let Some(session_id) = self.store.get(SESSION_ID_KEY).await? {
            if !session_id.is_empty() {
                return Ok(session_id);
            }
        }

        let session_id = SessionIdentity::create_id();
        self.store.set(SESSION_ID_KEY, &session_id).await?;
        tracing::debug!(session_id = %session_id, "Created session id");

        return Ok(session_id);
    }

    pub async fn reset(&self) -> Result<()> {
        return self.store.remove(SESSION_ID_KEY).await;
    }
}
