//! Route handlers organized by domain.

pub mod health;
pub mod history;
pub mod imports;
pub mod nodes;
pub mod updates;

use filetree_core::error::AppError;

/// Any unmatched route.
pub async fn fallback() -> AppError {
    AppError::not_found("Not found")
}
