//! Import pipeline: validate a batch, then merge it into the tree.

pub mod merge;
pub mod validator;

pub use merge::{MergeEngine, MergeOutcome, UndoLog};
pub use validator::BatchValidator;
