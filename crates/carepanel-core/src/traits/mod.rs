//! Core traits defined in `carepanel-core` and implemented by other crates.

pub mod token_store;

pub use token_store::TokenStore;
