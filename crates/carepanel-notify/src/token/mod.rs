//! Delivery token lifecycle: permission, issuance, caching, rotation.

pub mod lifecycle;
pub mod provider;

pub use lifecycle::{TokenHandle, TokenLifecycle};
pub use provider::{
    FixedPermission, HttpPushProvider, PermissionDecision, PermissionPrompt, PushProvider,
};
