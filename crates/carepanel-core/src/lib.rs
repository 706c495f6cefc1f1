//! # carepanel-core
//!
//! Core crate for CarePanel. Contains configuration schemas, the report and
//! notification domain types, the token store trait, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other CarePanel crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
