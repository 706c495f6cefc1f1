//! # carepanel-notify
//!
//! Push notification support for the dashboard:
//!
//! - [`token`] — permission request, delivery token issuance, caching, and
//!   rotation handling ([`TokenLifecycle`]).
//! - [`dispatch`] — operator-triggered notification submission
//!   ([`NotificationDispatcher`]).
//!
//! Nothing here is fatal to the dashboard: permission denial and issuance
//! or delivery failures all come back as values.

pub mod dispatch;
pub mod error;
pub mod token;

pub use dispatch::NotificationDispatcher;
pub use error::{DispatchError, TokenError};
pub use token::{
    FixedPermission, HttpPushProvider, PermissionDecision, PermissionPrompt, PushProvider,
    TokenHandle, TokenLifecycle,
};
