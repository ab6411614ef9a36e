//! Node operations exposed to the API layer.

pub mod service;

pub use service::{NodeService, TreeState};
