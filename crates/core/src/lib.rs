//! mergeview core library.
//!
//! Two cooperating pieces with no shared mutable state:
//! - [`diff`] turns unified-diff text, or a pair of revisions, into
//!   renderable line records.
//! - [`conflict`] tracks per-section resolution of a three-way merge until
//!   a whole changeset is resolved.
//!
//! Both are synchronous and perform no I/O; only [`config`] and the
//! descriptor loaders on [`ConflictChangeset`] touch the filesystem.

pub mod config;
pub mod conflict;
pub mod diff;
pub mod errors;

// Re-exports for convenience.
pub use config::AppConfig;
pub use conflict::{ConflictChangeset, ConflictFile, ConflictSection, Resolution, ResolutionSession};
pub use diff::{DiffLine, DiffLineKind};
