//! Shared value types.

pub mod id;
pub mod timestamp;

pub use id::NodeId;
pub use timestamp::Timestamp;
