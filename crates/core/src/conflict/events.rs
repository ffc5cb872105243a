//! Events a resolution session signals to its host.

use serde::{Deserialize, Serialize};

use super::changeset::ConflictChangeset;
use super::model::Resolution;

/// Something the host UI/controller should react to.
///
/// The engine only signals; persisting a finalized changeset or tearing down
/// a cancelled one is up to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionEvent {
    /// A section's resolution was set (`Some`) or cleared (`None`).
    ResolutionChanged {
        path: String,
        section_id: String,
        resolution: Option<Resolution>,
    },
    /// Every section is resolved and the host may commit this changeset.
    FinalizeRequested { changeset: ConflictChangeset },
    /// The session was abandoned; in-memory state has been discarded.
    CancelRequested { path_count: usize },
}

impl ResolutionEvent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResolutionChanged { .. } => "resolution_changed",
            Self::FinalizeRequested { .. } => "finalize_requested",
            Self::CancelRequested { .. } => "cancel_requested",
        }
    }
}
