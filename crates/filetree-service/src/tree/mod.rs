//! Live node storage and folder size computation.

pub mod size;
pub mod store;

pub use size::SizeAggregator;
pub use store::{Ancestors, TreeStore};
