//! # filetree-database
//!
//! PostgreSQL connection management, row-level repositories for nodes and
//! history, and the [`TreePersistence`] backends the service commits
//! accepted batches through.

pub mod connection;
pub mod migration;
pub mod persistence;
pub mod repositories;

pub use connection::{DatabasePool, WriteTransaction};
pub use persistence::{PersistedTree, PersistenceManager, TreePersistence};
