//! JSON-file token cache.

pub mod store;

pub use store::FileTokenStore;
