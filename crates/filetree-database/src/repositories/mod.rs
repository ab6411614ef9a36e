//! Row-level repositories for the node and history tables.

pub mod history;
pub mod node;

pub use history::HistoryRepository;
pub use node::NodeRepository;
