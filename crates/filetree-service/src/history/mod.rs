//! Node history.

pub mod store;

pub use store::HistoryStore;
