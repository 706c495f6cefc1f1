//! In-process token cache.

pub mod store;

pub use store::MemoryTokenStore;
