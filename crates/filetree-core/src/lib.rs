//! # filetree-core
//!
//! Core crate for FileTree. Contains configuration schemas, the typed node
//! identifier, the UTC millisecond timestamp codec, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other FileTree crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
