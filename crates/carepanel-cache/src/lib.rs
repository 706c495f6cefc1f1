//! # carepanel-cache
//!
//! Token cache providers for CarePanel. Supports two modes:
//!
//! - **memory**: the token lives for the duration of the process
//! - **file**: the token is written to a JSON file and reused across sessions
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::TokenCacheManager;
