//! Extractors that turn Axum rejections into `AppError`.
//!
//! Malformed bodies, ids, and query strings all surface to clients as the
//! same `400 Validation Failed` response.

pub mod json;
pub mod path;
pub mod query;

pub use json::ApiJson;
pub use path::ApiPath;
pub use query::ApiQuery;

use filetree_core::error::AppError;

pub(crate) const VALIDATION_FAILED: &str = "Validation Failed";

pub(crate) fn rejected(detail: impl std::fmt::Display) -> AppError {
    tracing::debug!(detail = %detail, "Request rejected by extractor");
    AppError::validation(VALIDATION_FAILED)
}
