//! Storage trait for the last issued notification token.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::token::CachedToken;

/// Backend holding at most one cached token.
///
/// Only the token lifecycle manager writes through this trait.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the cached token, if any.
    async fn load(&self) -> AppResult<Option<CachedToken>>;

    /// Replace the cached token.
    async fn save(&self, token: &CachedToken) -> AppResult<()>;

    /// Discard the cached token. Clearing an empty store is not an error.
    async fn clear(&self) -> AppResult<()>;
}
