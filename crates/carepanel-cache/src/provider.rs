//! Token cache manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use carepanel_core::config::TokenCacheConfig;
use carepanel_core::error::AppError;
use carepanel_core::result::AppResult;
use carepanel_core::traits::TokenStore;
use carepanel_core::types::CachedToken;

/// Wraps the token store selected by configuration.
#[derive(Debug, Clone)]
pub struct TokenCacheManager {
    inner: Arc<dyn TokenStore>,
}

impl TokenCacheManager {
    /// Create a token cache from configuration.
    pub fn new(config: &TokenCacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn TokenStore> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Using in-memory token cache");
                Arc::new(crate::memory::MemoryTokenStore::new())
            }
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.path, "Using file token cache");
                Arc::new(crate::file::FileTokenStore::new(&config.path))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown token cache provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a cache manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn TokenStore>) -> Self {
        Self { inner: store }
    }

    /// The store as a shareable trait object.
    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl TokenStore for TokenCacheManager {
    async fn load(&self) -> AppResult<Option<CachedToken>> {
        self.inner.load().await
    }

    async fn save(&self, token: &CachedToken) -> AppResult<()> {
        self.inner.save(token).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.inner.clear().await
    }
}
