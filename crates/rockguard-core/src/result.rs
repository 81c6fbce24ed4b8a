//! Convenience result type alias for RockGuard.

use crate::error::AppError;

/// A specialized `Result` type for RockGuard operations.
pub type AppResult<T> = Result<T, AppError>;
