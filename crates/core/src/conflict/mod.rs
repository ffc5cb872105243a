//! Merge-conflict resolution tracking.
//!
//! The conflict subsystem is responsible for:
//! 1. **Model** -- conflicted files and their per-section resolutions.
//! 2. **Tracking** -- a changeset's progress and whether it can be finalized.
//! 3. **Sessions** -- the host's active file/section pointers and the events
//!    it reacts to.
//! 4. **Detection** -- producing conflict sections from a three-way merge or
//!    from conflict-marked text.

pub mod changeset;
pub mod detector;
pub mod events;
pub mod markers;
pub mod model;
pub mod resolver;
pub mod session;

pub use changeset::{ConflictChangeset, Progress};
pub use detector::{detect_conflicts, three_way_merge, MergeOutcome};
pub use events::ResolutionEvent;
pub use markers::parse_conflict_markers;
pub use model::{ConflictFile, ConflictSection, Resolution};
pub use resolver::render_resolution;
pub use session::ResolutionSession;
