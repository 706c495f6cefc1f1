//! # carepanel-transport
//!
//! Outbound request execution against the backend data API. Every request
//! carries the configured base URL and static API key; response bodies are
//! passed through as opaque JSON. There is no retry or backoff here: callers
//! decide what a failure means.

pub mod client;
pub mod error;
pub mod response;

pub use client::{HttpTransport, Transport};
pub use error::TransportError;
pub use reqwest::Method;
pub use response::TransportResponse;
