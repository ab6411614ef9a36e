//! Request DTOs.

use serde::Deserialize;

use filetree_core::types::Timestamp;

/// Query for `GET /updates`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatesQuery {
    /// End of the 24 hour window.
    pub date: Timestamp,
}

/// Query for `GET /node/{id}/history`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Inclusive lower bound.
    #[serde(default)]
    pub date_start: Option<Timestamp>,
    /// Exclusive upper bound.
    #[serde(default)]
    pub date_end: Option<Timestamp>,
}
