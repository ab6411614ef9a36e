//! History domain entities.

pub mod model;

pub use model::HistoryRecord;
