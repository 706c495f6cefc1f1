//! In-memory token store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use carepanel_core::result::AppResult;
use carepanel_core::traits::TokenStore;
use carepanel_core::types::CachedToken;

/// Holds the token for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<CachedToken>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AppResult<Option<CachedToken>> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, token: &CachedToken) -> AppResult<()> {
        *self.slot.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.slot.write().await.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carepanel_core::types::NotificationToken;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_token() {
        let store = MemoryTokenStore::new();
        store
            .save(&CachedToken::issued_now(NotificationToken::new("old")))
            .await
            .unwrap();
        store
            .save(&CachedToken::issued_now(NotificationToken::new("new")))
            .await
            .unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token.as_str(), "new");
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_is_ok() {
        let store = MemoryTokenStore::new();
        assert!(store.clear().await.is_ok());
    }
}
