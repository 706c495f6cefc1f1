//! Token lifecycle manager.
//!
//! ```text
//! Unrequested ──request_permission──▶ PermissionDenied
//!      │                                   ▲
//!      └──────────▶ PermissionGranted ◀────┼──── issuance failure
//!                        │                 │
//!                   issuance ok            │
//!                        ▼                 │
//!                     Issued ──rotation──▶ Stale ──re-issue──▶ Issued | PermissionGranted
//! ```
//!
//! The manager is the only writer of the token. Readers hold a
//! [`TokenHandle`] and can observe, never modify.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use carepanel_core::traits::TokenStore;
use carepanel_core::types::{CachedToken, NotificationToken, TokenState};

use crate::error::TokenError;

use super::provider::{PermissionDecision, PushProvider};

/// Read-only view of the token state.
#[derive(Debug, Clone)]
pub struct TokenHandle {
    rx: watch::Receiver<TokenState>,
}

impl TokenHandle {
    /// Snapshot of the current state.
    pub fn state(&self) -> TokenState {
        self.rx.borrow().clone()
    }

    /// The token, only while it is issued.
    pub fn current(&self) -> Option<NotificationToken> {
        self.rx.borrow().token().cloned()
    }

    /// Wait for the next state change. Returns `false` once the manager is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Owns the notification token and drives its state machine.
pub struct TokenLifecycle {
    provider: Arc<dyn PushProvider>,
    store: Arc<dyn TokenStore>,
    public_key: String,
    state: watch::Sender<TokenState>,
    /// Serialises transitions; held across provider calls.
    transitions: Mutex<()>,
}

impl TokenLifecycle {
    /// Create a manager in the `Unrequested` state.
    pub fn new(
        provider: Arc<dyn PushProvider>,
        store: Arc<dyn TokenStore>,
        public_key: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(TokenState::Unrequested);
        Self {
            provider,
            store,
            public_key: public_key.into(),
            state,
            transitions: Mutex::new(()),
        }
    }

    /// Current state.
    pub fn state(&self) -> TokenState {
        self.state.borrow().clone()
    }

    /// A read-only handle for token consumers.
    pub fn subscribe(&self) -> TokenHandle {
        TokenHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Adopt a token cached by an earlier session.
    ///
    /// Only applies while still `Unrequested`. Returns whether a token was
    /// restored. An unreadable cache is logged and treated as empty, like
    /// failed writes.
    pub async fn restore(&self) -> bool {
        let _guard = self.transitions.lock().await;
        if self.state() != TokenState::Unrequested {
            return false;
        }
        match self.store.load().await {
            Ok(Some(cached)) => {
                info!(
                    token = %cached.token.fingerprint(),
                    issued_at = %cached.issued_at,
                    "Restored cached notification token"
                );
                self.set_state(TokenState::Issued(cached.token));
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read cached notification token");
                false
            }
        }
    }

    /// Ask for permission and, if granted, obtain a token.
    ///
    /// This is the operator-triggered entry point and the only way out of
    /// `PermissionDenied`.
    pub async fn request_permission(&self) -> Result<NotificationToken, TokenError> {
        let _guard = self.transitions.lock().await;

        match self.provider.request_permission().await {
            PermissionDecision::Denied => {
                info!("Notification permission denied");
                self.discard_cached().await;
                self.set_state(TokenState::PermissionDenied);
                Err(TokenError::PermissionDenied)
            }
            PermissionDecision::Granted => {
                if let Some(token) = self.state().token().cloned() {
                    return Ok(token);
                }
                self.set_state(TokenState::PermissionGranted);
                self.issue().await
            }
        }
    }

    /// Return the issued token, retrying issuance when permission is held.
    ///
    /// While `Issued` this never touches the provider.
    pub async fn get_token(&self) -> Result<NotificationToken, TokenError> {
        if let Some(token) = self.state().token().cloned() {
            return Ok(token);
        }

        let _guard = self.transitions.lock().await;
        match self.state() {
            TokenState::Issued(token) => Ok(token),
            TokenState::Unrequested => Err(TokenError::PermissionRequired),
            TokenState::PermissionDenied => Err(TokenError::PermissionDenied),
            TokenState::PermissionGranted | TokenState::Stale => self.issue().await,
        }
    }

    /// Explicitly re-issue the token.
    ///
    /// A different value from `Issued` is a rotation: the old token is marked
    /// stale and dropped from the cache before the new one is adopted. A
    /// failed refresh from `Issued` keeps the existing token, which the
    /// provider has not invalidated.
    pub async fn refresh(&self) -> Result<NotificationToken, TokenError> {
        let _guard = self.transitions.lock().await;
        match self.state() {
            TokenState::Unrequested => Err(TokenError::PermissionRequired),
            TokenState::PermissionDenied => Err(TokenError::PermissionDenied),
            TokenState::PermissionGranted | TokenState::Stale => self.issue().await,
            TokenState::Issued(previous) => {
                match self.provider.get_token(&self.public_key).await {
                    Ok(token) => {
                        if token != previous {
                            info!(
                                previous = %previous.fingerprint(),
                                current = %token.fingerprint(),
                                "Notification token rotated"
                            );
                            self.set_state(TokenState::Stale);
                            self.discard_cached().await;
                        }
                        self.adopt(token.clone()).await;
                        Ok(token)
                    }
                    Err(e) => {
                        warn!(error = %e, "Token refresh failed; keeping current token");
                        Err(e)
                    }
                }
            }
        }
    }

    /// React to the provider invalidating the issued token.
    ///
    /// The token is marked stale, dropped from the cache, and re-issued.
    pub async fn handle_rotation(&self) -> Result<NotificationToken, TokenError> {
        let _guard = self.transitions.lock().await;
        match self.state() {
            TokenState::Unrequested => Err(TokenError::PermissionRequired),
            TokenState::PermissionDenied => Err(TokenError::PermissionDenied),
            TokenState::Issued(previous) => {
                info!(
                    token = %previous.fingerprint(),
                    "Notification token invalidated by provider"
                );
                self.set_state(TokenState::Stale);
                self.discard_cached().await;
                self.issue().await
            }
            TokenState::PermissionGranted | TokenState::Stale => self.issue().await,
        }
    }

    /// Forward provider rotation signals into [`Self::handle_rotation`].
    ///
    /// Returns `None` when the provider has no rotation channel.
    pub fn spawn_rotation_listener(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut rotations = self.provider.subscribe_rotations()?;
        let manager = Arc::clone(self);
        Some(tokio::spawn(async move {
            loop {
                match rotations.recv().await {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        if let Err(e) = manager.handle_rotation().await {
                            warn!(error = %e, "Re-issuing rotated token failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            debug!("Rotation channel closed");
        }))
    }

    /// Request a token; caller holds the transition lock.
    async fn issue(&self) -> Result<NotificationToken, TokenError> {
        match self.provider.get_token(&self.public_key).await {
            Ok(token) => {
                self.adopt(token.clone()).await;
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "Notification token issuance failed");
                self.set_state(TokenState::PermissionGranted);
                Err(e)
            }
        }
    }

    async fn adopt(&self, token: NotificationToken) {
        if let Err(e) = self.store.save(&CachedToken::issued_now(token.clone())).await {
            warn!(error = %e, "Failed to persist notification token");
        }
        info!(token = %token.fingerprint(), "Notification token issued");
        self.set_state(TokenState::Issued(token));
    }

    async fn discard_cached(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear cached notification token");
        }
    }

    fn set_state(&self, next: TokenState) {
        let previous = self.state.send_replace(next);
        debug!(
            from = previous.name(),
            to = self.state.borrow().name(),
            "Token state transition"
        );
    }
}
