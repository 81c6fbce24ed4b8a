//! # rockguard-core
//!
//! Core crate for RockGuard. Contains the configuration schemas, the
//! validated recipient type, the mail transport trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other RockGuard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
